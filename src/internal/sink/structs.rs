pub mod file_sink;
pub mod memory_sink;
pub mod offset_writer;

// 重导出公共类型
pub use file_sink::FileSink;
pub use memory_sink::MemorySink;
pub use offset_writer::OffsetWriter;
