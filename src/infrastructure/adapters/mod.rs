//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod audio;
pub mod script;
pub mod translator;
pub mod tts;

pub use audio::*;
pub use script::*;
pub use translator::*;
pub use tts::*;
