/// Index arithmetic for a ring of fixed capacity.
///
/// `Masked` relies on `index & (capacity - 1)` and is only correct for
/// power-of-two capacities; `Modulo` works for any capacity. Both produce the
/// same logical positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Masked,
    Modulo,
}

impl AddressingMode {
    pub fn for_capacity(capacity: usize) -> Self {
        if capacity.is_power_of_two() {
            Self::Masked
        } else {
            Self::Modulo
        }
    }

    /// Map any index below `2 * capacity` back into `[0, capacity)`.
    #[inline]
    pub fn wrap(self, index: usize, capacity: usize) -> usize {
        match self {
            Self::Masked => index & (capacity - 1),
            Self::Modulo => index % capacity,
        }
    }

    /// Step one slot backwards without going below zero.
    #[inline]
    pub fn rewind(self, index: usize, capacity: usize) -> usize {
        match self {
            Self::Masked => index.wrapping_sub(1) & (capacity - 1),
            Self::Modulo => {
                if index == 0 {
                    capacity - 1
                } else {
                    index - 1
                }
            }
        }
    }
}

/// How a push writes and advances the head, fixed at construction.
///
/// Mirrored variants also write the shadow slot at `head + capacity` so the
/// window `[head, head + capacity)` is always contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PushStrategy {
    Masked,
    MaskedMirrored,
    Modulo,
    ModuloMirrored,
}

impl PushStrategy {
    pub(crate) fn select(mode: AddressingMode, mirrored: bool) -> Self {
        match (mode, mirrored) {
            (AddressingMode::Masked, false) => Self::Masked,
            (AddressingMode::Masked, true) => Self::MaskedMirrored,
            (AddressingMode::Modulo, false) => Self::Modulo,
            (AddressingMode::Modulo, true) => Self::ModuloMirrored,
        }
    }

    /// Write `value` at `*head` and advance it.
    #[inline]
    pub(crate) fn push(self, data: &mut [f32], head: &mut usize, capacity: usize, value: f32) {
        match self {
            Self::Masked => {
                data[*head] = value;
                *head = (*head + 1) & (capacity - 1);
            }
            Self::MaskedMirrored => {
                data[*head] = value;
                data[*head + capacity] = value;
                *head = (*head + 1) & (capacity - 1);
            }
            Self::Modulo => {
                data[*head] = value;
                *head += 1;
                if *head == capacity {
                    *head = 0;
                }
            }
            Self::ModuloMirrored => {
                data[*head] = value;
                data[*head + capacity] = value;
                *head += 1;
                if *head == capacity {
                    *head = 0;
                }
            }
        }
    }
}

/// Backwards walk used by the FIR engine, fixed when taps are configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FirWalk {
    Masked,
    Modulo,
}

impl FirWalk {
    pub(crate) fn select(mode: AddressingMode) -> Self {
        match mode {
            AddressingMode::Masked => Self::Masked,
            AddressingMode::Modulo => Self::Modulo,
        }
    }

    /// `sum(taps[k] * data[head - 1 - k])`, stepping back through the ring
    /// with an unsigned wrap.
    #[inline]
    pub(crate) fn output(self, data: &[f32], head: usize, capacity: usize, taps: &[f32]) -> f32 {
        let mut index = head;
        let mut acc = 0.0;
        match self {
            Self::Masked => {
                let mask = capacity - 1;
                for &tap in taps {
                    index = index.wrapping_sub(1) & mask;
                    acc += data[index] * tap;
                }
            }
            Self::Modulo => {
                for &tap in taps {
                    index = if index == 0 { capacity - 1 } else { index - 1 };
                    acc += data[index] * tap;
                }
            }
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_follows_power_of_two() {
        assert_eq!(AddressingMode::for_capacity(1), AddressingMode::Masked);
        assert_eq!(AddressingMode::for_capacity(64), AddressingMode::Masked);
        assert_eq!(AddressingMode::for_capacity(5), AddressingMode::Modulo);
        assert_eq!(AddressingMode::for_capacity(100), AddressingMode::Modulo);
    }

    #[test]
    fn wrap_agrees_between_modes() {
        for index in 0..16 {
            assert_eq!(
                AddressingMode::Masked.wrap(index, 8),
                AddressingMode::Modulo.wrap(index, 8)
            );
        }
    }

    #[test]
    fn rewind_wraps_at_zero() {
        assert_eq!(AddressingMode::Masked.rewind(0, 8), 7);
        assert_eq!(AddressingMode::Modulo.rewind(0, 6), 5);
        assert_eq!(AddressingMode::Masked.rewind(3, 8), 2);
        assert_eq!(AddressingMode::Modulo.rewind(3, 6), 2);
    }

    #[test]
    fn push_strategies_advance_identically() {
        for mirrored in [false, true] {
            let masked = PushStrategy::select(AddressingMode::Masked, mirrored);
            let modulo = PushStrategy::select(AddressingMode::Modulo, mirrored);
            let len = if mirrored { 8 } else { 4 };

            let (mut a, mut b) = (vec![0.0; len], vec![0.0; len]);
            let (mut ha, mut hb) = (0, 0);
            for i in 0..10 {
                masked.push(&mut a, &mut ha, 4, i as f32);
                modulo.push(&mut b, &mut hb, 4, i as f32);
                assert_eq!(ha, hb);
            }
            assert_eq!(a, b);
        }
    }

    #[test]
    fn fir_walk_follows_addressing_mode() {
        assert_eq!(FirWalk::select(AddressingMode::Masked), FirWalk::Masked);
        assert_eq!(FirWalk::select(AddressingMode::Modulo), FirWalk::Modulo);
    }

    #[test]
    fn fir_walks_wrap_backwards_from_head() {
        // Newest sample sits at slot 0, so the walk wraps straight away.
        let data = [4.0, 1.0, 2.0, 3.0];
        let taps = [1.0, 10.0, 100.0];
        assert_eq!(FirWalk::Masked.output(&data, 1, 4, &taps), 4.0 + 30.0 + 200.0);
        assert_eq!(FirWalk::Modulo.output(&data, 1, 4, &taps), 4.0 + 30.0 + 200.0);
    }

    #[test]
    fn mirrored_push_fills_shadow_region() {
        let strategy = PushStrategy::select(AddressingMode::Modulo, true);
        let mut data = vec![0.0; 6];
        let mut head = 0;
        strategy.push(&mut data, &mut head, 3, 1.0);
        strategy.push(&mut data, &mut head, 3, 2.0);
        assert_eq!(data, vec![1.0, 2.0, 0.0, 1.0, 2.0, 0.0]);
        assert_eq!(head, 2);
    }
}
