/// Device profile facts the host launcher exposes to icon producers.
pub trait DeviceProfilePort {
    /// Configured icon bitmap size in pixels.
    fn icon_bitmap_size(&self) -> u32;
}
