use std::io::{self, Write};
use std::path::Path;

use crate::physics::atmosphere;
use crate::sim::FlightPath;

/// Write a traced trajectory in CSV format.
///
/// Columns: time, x, y, vx, vy, speed, descent_angle_deg, density
pub fn write_trace<W: Write>(writer: &mut W, path: &FlightPath) -> io::Result<()> {
    writeln!(writer, "time,x,y,vx,vy,speed,descent_angle_deg,density")?;

    for (t, s) in &path.states {
        writeln!(
            writer,
            "{:.2},{:.3},{:.3},{:.4},{:.4},{:.4},{:.4},{:.6}",
            t,
            s.pos.x, s.pos.y,
            s.vel.x, s.vel.y,
            s.speed(),
            s.descent_angle_deg(),
            atmosphere::air_density(s.pos.y),
        )?;
    }

    Ok(())
}

/// Write a traced trajectory to a CSV file at the given path.
pub fn write_trace_file(file_path: impl AsRef<Path>, path: &FlightPath) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(file_path)?);
    write_trace(&mut file, path)?;
    file.flush()
}
