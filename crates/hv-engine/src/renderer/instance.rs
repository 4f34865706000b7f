use bytemuck::{Pod, Zeroable};

use crate::components::layer::RenderLayer;
use crate::components::sprite::AtlasId;

/// Per-instance render data read by the TypeScript renderer.
/// Eight floats per sprite, in the order the front-end's vertex layout expects.
///
/// `scale` is the side of the drawn square.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Center, in the camera's screen space.
    pub x: f32,
    pub y: f32,
    /// Radians, counter-clockwise.
    pub rotation: f32,
    pub scale: f32,
    /// Atlas column.
    pub sprite_col: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Atlas cells covered per axis.
    pub cell_span: f32,
    pub atlas_row: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// A contiguous run of instances drawn with one atlas on one layer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct AtlasBatch {
    pub atlas: u32,
    pub layer: u32,
    pub start: u32,
    pub count: u32,
}

impl AtlasBatch {
    pub const U32S: usize = 4;
}

/// Render buffer containing all sprite instances and their batches.
pub struct RenderBuffer {
    /// Instances in draw order: by layer, then by atlas.
    pub instances: Vec<RenderInstance>,
    pub batches: Vec<AtlasBatch>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(512),
            batches: Vec::with_capacity(16),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.batches.clear();
    }

    /// Append an instance, opening a new batch when layer or atlas changes.
    pub fn push(&mut self, layer: RenderLayer, atlas: AtlasId, instance: RenderInstance) {
        let start = self.instances.len() as u32;
        self.instances.push(instance);
        match self.batches.last_mut() {
            Some(batch) if batch.atlas == atlas.0 && batch.layer == layer.as_u8() as u32 => {
                batch.count += 1;
            }
            _ => self.batches.push(AtlasBatch {
                atlas: atlas.0,
                layer: layer.as_u8() as u32,
                start,
                count: 1,
            }),
        }
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn batch_count(&self) -> u32 {
        self.batches.len() as u32
    }

    /// Raw pointer to instance data for zero-copy reads from JS.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn batches_ptr(&self) -> *const u32 {
        self.batches.as_ptr() as *const u32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), RenderInstance::STRIDE_BYTES);
        assert_eq!(std::mem::size_of::<AtlasBatch>(), AtlasBatch::U32S * 4);
    }

    #[test]
    fn push_groups_consecutive_runs() {
        let mut buf = RenderBuffer::new();
        let i = RenderInstance::default();
        buf.push(RenderLayer::Terrain, AtlasId(0), i);
        buf.push(RenderLayer::Terrain, AtlasId(0), i);
        buf.push(RenderLayer::Objects, AtlasId(1), i);
        buf.push(RenderLayer::UI, AtlasId(1), i);

        assert_eq!(buf.instance_count(), 4);
        assert_eq!(buf.batch_count(), 3);
        assert_eq!(buf.batches[0], AtlasBatch { atlas: 0, layer: 1, start: 0, count: 2 });
        assert_eq!(buf.batches[2].start, 3);
    }

    #[test]
    fn clear_empties_both_lists() {
        let mut buf = RenderBuffer::new();
        buf.push(RenderLayer::UI, AtlasId(2), RenderInstance::default());
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
        assert_eq!(buf.batch_count(), 0);
    }
}
