//! 测试模块入口：模拟传输与公共工具在 `lib` 子模块，各组件的测试在 `internal`。

#[cfg(test)]
pub use lib::*;
