pub mod spectral_transform;
