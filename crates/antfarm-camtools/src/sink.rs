//! Destinations for planned paths.

use crate::error::{CamToolError, CamToolResult};
use crate::planner::PlanningResult;
use antfarm_core::Geometry;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Receives the inputs and result of each planning call.
pub trait PathSink {
    fn consume(&mut self, inputs: &[Geometry], result: &PlanningResult) -> CamToolResult<()>;
}

/// A planning call as stored by [`MemorySink`] and written by [`JsonSink`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedJob {
    pub inputs: Vec<Geometry>,
    pub result: PlanningResult,
}

#[derive(Serialize)]
struct PlannedJobRef<'a> {
    inputs: &'a [Geometry],
    result: &'a PlanningResult,
}

/// Keeps every planned job in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    jobs: Vec<PlannedJob>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jobs(&self) -> &[PlannedJob] {
        &self.jobs
    }

    pub fn last(&self) -> Option<&PlannedJob> {
        self.jobs.last()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn into_jobs(self) -> Vec<PlannedJob> {
        self.jobs
    }
}

impl PathSink for MemorySink {
    fn consume(&mut self, inputs: &[Geometry], result: &PlanningResult) -> CamToolResult<()> {
        self.jobs.push(PlannedJob {
            inputs: inputs.to_vec(),
            result: result.clone(),
        });
        Ok(())
    }
}

/// Writes each planned job as one JSON document followed by a newline.
pub struct JsonSink<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PathSink for JsonSink<W> {
    fn consume(&mut self, inputs: &[Geometry], result: &PlanningResult) -> CamToolResult<()> {
        let job = PlannedJobRef { inputs, result };
        let written = if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &job)
        } else {
            serde_json::to_writer(&mut self.writer, &job)
        };
        written.map_err(|e| {
            if e.is_io() {
                CamToolError::Sink(format!("Failed to write planned paths: {}", e))
            } else {
                CamToolError::SerializationError(e)
            }
        })?;

        writeln!(self.writer)
            .and_then(|_| self.writer.flush())
            .map_err(|e| CamToolError::Sink(format!("Failed to write planned paths: {}", e)))
    }
}
