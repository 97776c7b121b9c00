pub mod gltf;

pub use self::gltf::{load_gltf_file, load_gltf_slice};
