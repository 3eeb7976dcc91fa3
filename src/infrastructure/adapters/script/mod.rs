//! Script Adapter - 剧本文本来源实现

mod file_script_source;

pub use file_script_source::FileScriptSource;
