use glam::Vec2;

/// 2D view onto the world, described by its center and visible size.
/// World space is y-up; the front-end builds its own projection from these values.
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// Viewport size in world units.
    pub width: f32,
    pub height: f32,
    /// World point at the middle of the viewport.
    pub center: Vec2,
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            center: Vec2::new(width / 2.0, height / 2.0),
        }
    }

    /// Center the viewport on `target`.
    pub fn look_at(&mut self, target: Vec2) {
        self.center = target;
    }

    /// World position of the viewport's bottom-left corner.
    /// Screen-space content is drawn relative to this point.
    pub fn screen_origin(&self) -> Vec2 {
        self.center - Vec2::new(self.width, self.height) / 2.0
    }

    /// Whether a box given by center and half size is on screen.
    pub fn is_rect_visible(&self, rect_center: Vec2, rect_half_size: Vec2) -> bool {
        let cam_min = self.screen_origin();
        let cam_max = cam_min + Vec2::new(self.width, self.height);
        let rect_min = rect_center - rect_half_size;
        let rect_max = rect_center + rect_half_size;

        rect_max.x >= cam_min.x
            && rect_min.x <= cam_max.x
            && rect_max.y >= cam_min.y
            && rect_min.y <= cam_max.y
    }
}
