use crate::error::{DashboardError, Result};
use crate::models::Vehicle;
use crate::simulation_engine::grid::Canvas;
use plotters::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Everything needed to draw one state of the simulation.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// 0 for the initial drawing, then one per tick.
    pub tick: u64,
    pub canvas: &'a Canvas,
    pub vehicles: &'a [Vehicle],
}

/// Receives every frame the simulation produces.
pub trait FrameRenderer {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<()>;
}

impl<R: FrameRenderer + ?Sized> FrameRenderer for &mut R {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<()> {
        (**self).draw(frame)
    }
}

impl<R: FrameRenderer> FrameRenderer for Option<R> {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<()> {
        match self {
            Some(renderer) => renderer.draw(frame),
            None => Ok(()),
        }
    }
}

impl<A: FrameRenderer, B: FrameRenderer> FrameRenderer for (A, B) {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<()> {
        self.0.draw(frame)?;
        self.1.draw(frame)
    }
}

fn render_error<E: std::fmt::Display>(e: E) -> DashboardError {
    DashboardError::Render(e.to_string())
}

/// Draws each frame into a PNG: green grid, one filled circle per vehicle.
///
/// Vehicles get a fresh random colour on every frame.
pub struct BitmapRenderer {
    output_dir: PathBuf,
    rng: SmallRng,
}

impl BitmapRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self {
            output_dir,
            rng: SmallRng::from_rng(&mut rand::rng()),
        })
    }

    /// Same as `new` but with reproducible colours.
    pub fn with_seed(output_dir: impl Into<PathBuf>, seed: u64) -> Result<Self> {
        let mut renderer = Self::new(output_dir)?;
        renderer.rng = SmallRng::seed_from_u64(seed);
        Ok(renderer)
    }

    pub fn frame_path(&self, tick: u64) -> PathBuf {
        self.output_dir.join(format!("frame_{tick:05}.png"))
    }

    fn random_color(&mut self) -> RGBColor {
        let packed: u32 = self.rng.random_range(0..0xFF_FFFF);
        RGBColor((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
    }
}

impl FrameRenderer for BitmapRenderer {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<()> {
        let canvas = frame.canvas;
        let path = self.frame_path(frame.tick);
        let root = BitMapBackend::new(&path, (canvas.width, canvas.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        for (from, to) in canvas.grid_lines() {
            root.draw(&PathElement::new(vec![from, to], GREEN))
                .map_err(render_error)?;
        }

        for vehicle in frame.vehicles {
            let center = canvas.to_screen(vehicle.position_x, vehicle.position_y);
            if !canvas.is_visible(center) {
                continue;
            }
            let color = self.random_color();
            root.draw(&Circle::new(
                center,
                canvas.vehicle_radius as i32,
                color.filled(),
            ))
            .map_err(render_error)?;
        }

        root.present().map_err(render_error)?;
        log::debug!("frame {} written to {}", frame.tick, path.display());
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct TrajectoryRecord<'a> {
    tick: u64,
    vehicle_id: &'a str,
    name: &'a str,
    position_x: f64,
    position_y: f64,
    direction: &'a str,
}

/// Writes one CSV row per vehicle per frame.
pub struct TrajectoryLog<W: Write> {
    writer: csv::Writer<W>,
}

impl TrajectoryLog<fs::File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            writer: csv::Writer::from_path(path)?,
        })
    }
}

impl<W: Write> TrajectoryLog<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| DashboardError::Io(e.into_error()))
    }
}

impl<W: Write> FrameRenderer for TrajectoryLog<W> {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<()> {
        for vehicle in frame.vehicles {
            self.writer.serialize(TrajectoryRecord {
                tick: frame.tick,
                vehicle_id: vehicle.id.as_str(),
                name: &vehicle.name,
                position_x: vehicle.position_x,
                position_y: vehicle.position_y,
                direction: vehicle.direction.map(|d| d.as_str()).unwrap_or(""),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
