use bytemuck::{Pod, Zeroable};

/// Vertex consumed by both fill extrusion programs.
///
/// `normal_ed` packs the face normal (x carries the top/side flag in its
/// lowest bit) and the accumulated edge distance used to wrap patterns
/// around walls.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct FillExtrusionLayoutVertex {
    pub pos: [i16; 2],
    pub normal_ed: [i16; 4],
}

const _: () = assert!(std::mem::size_of::<FillExtrusionLayoutVertex>() == 12);

const NORMAL_FACTOR: f64 = 8192.0;

impl FillExtrusionLayoutVertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![
            0 => Sint16x2,
            1 => Sint16x4,
        ],
    };
}

/// Packs one extrusion vertex.
///
/// The normal is scaled by 2^14 so it survives the trip through `i16`;
/// `top` marks vertices on the roof and `edge_distance` is the running wall
/// length in tile units.
pub fn layout_vertex(
    pos: [i16; 2],
    nx: f64,
    ny: f64,
    nz: f64,
    top: u16,
    edge_distance: u16,
) -> FillExtrusionLayoutVertex {
    FillExtrusionLayoutVertex {
        pos,
        normal_ed: [
            ((nx * NORMAL_FACTOR).floor() * 2.0 + f64::from(top)) as i16,
            (ny * NORMAL_FACTOR * 2.0) as i16,
            (nz * NORMAL_FACTOR * 2.0) as i16,
            edge_distance as i16,
        ],
    }
}
