//! 下载客户端领域模块：重定向执行器、响应头探测、串行下载与分片并发下载。

pub mod structs;
