use super::LayerSink;
use crate::basemap::{BaseLayer, FillStyle};
use crate::error::Result;
use crate::style::PlannedGroup;
use std::io::Write;

/// Prints a short description of every layer.
pub struct SummarySink<W: Write> {
    out: W,
    layers: usize,
}

impl<W: Write> SummarySink<W> {
    pub fn new(out: W) -> Self {
        Self { out, layers: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl SummarySink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> LayerSink for SummarySink<W> {
    fn add_base_layer(&mut self, layer: &BaseLayer, fill: &FillStyle) -> Result<()> {
        writeln!(
            self.out,
            "Base layer {} ({:?}) fill {}",
            layer.name, layer.shape_type, fill.color
        )?;
        Ok(())
    }

    fn add_point_layer(&mut self, layer: &PlannedGroup) -> Result<()> {
        self.layers += 1;
        writeln!(
            self.out,
            "Layer {}: {} points, {} lineages",
            layer.layer_name(),
            layer.group.len(),
            layer.plan.len()
        )?;
        for category in layer.plan.categories() {
            let count = layer
                .group
                .entries()
                .iter()
                .filter(|(lineage, _)| lineage == &category.lineage)
                .count();
            writeln!(
                self.out,
                "  {} {} ({} points)",
                category.color,
                category.label(),
                count
            )?;
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        writeln!(self.out, "Rendered {} layers", self.layers)?;
        self.out.flush()?;
        Ok(())
    }
}
