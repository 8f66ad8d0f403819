pub mod addressing;
pub mod fir;
pub mod real_fft;
pub mod ring_buffer;
pub mod spectral;
pub mod statistics;
pub mod vector;
