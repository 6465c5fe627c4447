mod chunked;
mod feed_ranges;
mod fetch_range;
mod spawn_workers;
