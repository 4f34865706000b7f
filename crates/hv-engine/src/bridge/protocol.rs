/// Frame buffer layout shared with the front-end.
/// The front-end reads the same layout; keep both sides in step.
///
/// All values are f32:
/// ```text
/// [Header: 16 floats]
/// [Instances: max_instances × 8 floats]
/// [Batches: max_batches × 4 floats]   atlas, layer, start, count
/// [Events: max_events × 4 floats]     kind, a, b, c
/// ```
///
/// Capacities are written into the header every frame.
/// The front-end takes the capacities from the header and derives offsets.

use crate::api::game::GameConfig;

/// Floats reserved for the header.
pub const HEADER_FLOATS: usize = 16;

/// Header slots.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_BATCHES: usize = 4;
pub const HEADER_BATCH_COUNT: usize = 5;
pub const HEADER_MAX_EVENTS: usize = 6;
pub const HEADER_EVENT_COUNT: usize = 7;
pub const HEADER_WORLD_WIDTH: usize = 8;
pub const HEADER_WORLD_HEIGHT: usize = 9;
pub const HEADER_CAMERA_X: usize = 10;
pub const HEADER_CAMERA_Y: usize = 11;

/// Bumped whenever the layout changes.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per render instance (wire format, never changes).
pub const INSTANCE_FLOATS: usize = 8;

/// Floats per atlas batch: atlas, layer, start, count.
pub const BATCH_FLOATS: usize = 4;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_batches: usize,
    pub max_events: usize,

    /// First float of the instance section.
    pub instance_data_offset: usize,
    /// Offset (in floats) where batch data begins.
    pub batch_data_offset: usize,
    /// First float of the event section.
    pub event_data_offset: usize,

    /// Floats in the whole buffer.
    pub buffer_total_floats: usize,
}

impl ProtocolLayout {
    /// Layout for the given section capacities.
    pub fn new(max_instances: usize, max_batches: usize, max_events: usize) -> Self {
        let instance_data_offset = HEADER_FLOATS;
        let batch_data_offset = instance_data_offset + max_instances * INSTANCE_FLOATS;
        let event_data_offset = batch_data_offset + max_batches * BATCH_FLOATS;
        let buffer_total_floats = event_data_offset + max_events * EVENT_FLOATS;

        Self {
            max_instances,
            max_batches,
            max_events,
            instance_data_offset,
            batch_data_offset,
            event_data_offset,
            buffer_total_floats,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_batches, config.max_events)
    }

    /// Bytes in the whole buffer.
    pub fn buffer_total_bytes(&self) -> usize {
        self.buffer_total_floats * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_layout() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());
        assert_eq!(layout.max_instances, 2048);
        assert_eq!(layout.instance_data_offset, 16);
        assert_eq!(layout.batch_data_offset, 16 + 2048 * 8);
        assert_eq!(layout.event_data_offset, 16 + 2048 * 8 + 32 * 4);
        assert_eq!(layout.buffer_total_floats, 16 + 2048 * 8 + 32 * 4 + 32 * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 10, 20);
        assert_eq!(layout.batch_data_offset - layout.instance_data_offset, 100 * INSTANCE_FLOATS);
        assert_eq!(layout.event_data_offset - layout.batch_data_offset, 10 * BATCH_FLOATS);
        assert_eq!(layout.buffer_total_floats - layout.event_data_offset, 20 * EVENT_FLOATS);
        assert_eq!(layout.buffer_total_bytes(), layout.buffer_total_floats * 4);
    }

    #[test]
    fn header_fields_fit() {
        assert!(HEADER_CAMERA_Y < HEADER_FLOATS);
    }
}
