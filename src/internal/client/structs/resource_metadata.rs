/// 探测得到的资源信息；`content_length` 为 0 表示长度未知。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceMetadata {
    pub content_length: u64,
    /// 服务器是否声明 `Accept-Ranges: bytes`
    pub accepts_ranges: bool,
}

impl ResourceMetadata {
    pub fn is_length_known(&self) -> bool {
        self.content_length > 0
    }
}
