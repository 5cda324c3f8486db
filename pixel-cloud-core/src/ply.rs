/// ASCII PLY export for sampled point clouds
use crate::cloud::PointCloud;
use std::io::{self, Write};

/// Serialise the cloud as a vertex-only ASCII PLY payload
pub fn export_cloud(cloud: &PointCloud) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(128 + cloud.len() * 32);
    write_ply(&mut bytes, cloud)?;
    Ok(bytes)
}

/// Write the cloud to any sink in ASCII PLY with per-vertex uchar colour.
/// An empty cloud produces a header-only file with `element vertex 0`.
pub fn write_ply<W: Write>(writer: &mut W, cloud: &PointCloud) -> io::Result<()> {
    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "element vertex {}", cloud.len())?;
    writeln!(writer, "property float x")?;
    writeln!(writer, "property float y")?;
    writeln!(writer, "property float z")?;
    writeln!(writer, "property uchar red")?;
    writeln!(writer, "property uchar green")?;
    writeln!(writer, "property uchar blue")?;
    writeln!(writer, "end_header")?;

    for point in cloud.points() {
        let [x, y, z] = point.position;
        let [r, g, b] = point.color;
        writeln!(
            writer,
            "{:.3} {:.3} {:.3} {} {} {}",
            x,
            y,
            z,
            channel_byte(r),
            channel_byte(g),
            channel_byte(b)
        )?;
    }

    Ok(())
}

/// Scale a float channel to a byte: x255, floored, clamped to 0..=255
fn channel_byte(channel: f32) -> u8 {
    (channel * 255.0).floor().clamp(0.0, 255.0) as u8
}
