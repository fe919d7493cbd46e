//! Axis-aligned bounding boxes and the two-phase hit test used for obstacles
//! and coins.

/// A rectangle in pixels. Entity hitboxes are stored relative to the entity's
/// top-left corner; [`CollisionBox::offset_by`] moves them into world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CollisionBox {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict overlap on both axes. Touching edges do not collide.
    pub fn intersects(&self, other: &CollisionBox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn offset_by(&self, origin: &CollisionBox) -> CollisionBox {
        CollisionBox::new(self.x + origin.x, self.y + origin.y, self.width, self.height)
    }

    /// Shrink by one pixel on every side to ignore the sprite border.
    fn inset(&self) -> CollisionBox {
        CollisionBox::new(self.x + 1.0, self.y + 1.0, self.width - 2.0, self.height - 2.0)
    }

    fn grow_vertical(&self, margin: f64) -> CollisionBox {
        CollisionBox::new(self.x, self.y - margin, self.width, self.height + margin * 2.0)
    }
}

/// Something that can be hit: a world-space outline plus local hitboxes.
pub trait Collidable {
    fn bounds(&self) -> CollisionBox;
    fn collision_boxes(&self) -> &[CollisionBox];
}

/// Outline test first, then every pair of inner boxes. Returns the first
/// overlapping pair in world space.
pub fn check_for_collision<A, B>(a: &A, b: &B) -> Option<(CollisionBox, CollisionBox)>
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    let a_outline = a.bounds().inset();
    let b_outline = b.bounds().inset();

    if !a_outline.intersects(&b_outline) {
        return None;
    }

    for a_box in a.collision_boxes() {
        let a_box = a_box.offset_by(&a_outline);
        for b_box in b.collision_boxes() {
            let b_box = b_box.offset_by(&b_outline);
            if a_box.intersects(&b_box) {
                return Some((a_box, b_box));
            }
        }
    }
    None
}

/// Coin pickup: outline overlap with the coin stretched vertically by `tolerance`.
pub fn check_pickup<A, B>(coin: &A, player: &B, tolerance: f64) -> bool
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    coin.bounds()
        .grow_vertical(tolerance)
        .intersects(&player.bounds().inset())
}
