//! Bit-packed vertex format shared by every mesh the crate produces.
//!
//! One vertex is a single `u32`, low to high: 6 bits per position axis,
//! 2 bits per normal axis, and the material color-ID in the top byte. The
//! layout is a wire format the vertex shader decodes; changing it means
//! changing the shader in lockstep.

use bytemuck::{Pod, Zeroable};

/// Bits per position axis. Positions above `2^6 - 1` do not fit; a chunk
/// side of 32 leaves headroom up to 63.
pub const POSITION_BITS: u32 = 6;
/// Bits per normal axis (codes 0, 1, 2 for 0, +1, -1).
pub const NORMAL_BITS: u32 = 2;

const POSITION_MASK: u32 = (1 << POSITION_BITS) - 1;
const NORMAL_MASK: u32 = (1 << NORMAL_BITS) - 1;

const X_SHIFT: u32 = 0;
const Y_SHIFT: u32 = POSITION_BITS;
const Z_SHIFT: u32 = 2 * POSITION_BITS;
const NORMAL_SHIFT: u32 = 3 * POSITION_BITS;
const COLOR_SHIFT: u32 = NORMAL_SHIFT + 3 * NORMAL_BITS;

/// A position + normal + color-ID vertex packed into one 32-bit word.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct PackedVertex(pub u32);

impl PackedVertex {
    /// Packs a vertex. Coordinates must fit the 6-bit fields and each normal
    /// component must be -1, 0 or +1; the color-ID must fit the palette.
    pub fn pack(x: u32, y: u32, z: u32, normal: [i32; 3], color_id: u8) -> Self {
        debug_assert!(
            x <= POSITION_MASK && y <= POSITION_MASK && z <= POSITION_MASK,
            "position ({x}, {y}, {z}) exceeds the {POSITION_BITS}-bit field"
        );
        debug_assert!(
            color_id < crate::world::MaterialPalette::MAX_COLOR_ID,
            "color-ID {color_id} exceeds the palette"
        );

        let packed_normal = encode_axis(normal[0])
            | encode_axis(normal[1]) << NORMAL_BITS
            | encode_axis(normal[2]) << (2 * NORMAL_BITS);

        Self(
            x << X_SHIFT
                | y << Y_SHIFT
                | z << Z_SHIFT
                | packed_normal << NORMAL_SHIFT
                | (color_id as u32) << COLOR_SHIFT,
        )
    }

    pub fn position(self) -> [u32; 3] {
        [
            self.0 >> X_SHIFT & POSITION_MASK,
            self.0 >> Y_SHIFT & POSITION_MASK,
            self.0 >> Z_SHIFT & POSITION_MASK,
        ]
    }

    pub fn normal(self) -> [i32; 3] {
        let bits = self.0 >> NORMAL_SHIFT;
        [
            decode_axis(bits & NORMAL_MASK),
            decode_axis(bits >> NORMAL_BITS & NORMAL_MASK),
            decode_axis(bits >> (2 * NORMAL_BITS) & NORMAL_MASK),
        ]
    }

    pub fn color_id(self) -> u8 {
        (self.0 >> COLOR_SHIFT) as u8
    }
}

/// Normal axis encoding: 0 stays 0, +1 stays 1, -1 becomes 2.
fn encode_axis(component: i32) -> u32 {
    debug_assert!((-1..=1).contains(&component), "normal component {component}");
    if component == -1 {
        2
    } else {
        component as u32
    }
}

fn decode_axis(code: u32) -> i32 {
    if code == 2 {
        -1
    } else {
        code as i32
    }
}

/// The byte view of a vertex sequence, as handed to the GPU buffer sink.
pub fn vertex_bytes(vertices: &[PackedVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
