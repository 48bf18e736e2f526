// Purpose - external interfaces: sound files on disk, keys from the terminal

pub mod assets;
pub mod keyboard;

pub use assets::{AssetBank, SoundAsset};
pub use keyboard::KeyEvent;
