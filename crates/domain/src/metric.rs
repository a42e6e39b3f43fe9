//! Pluggable training metrics.
//!
//! A metric derives a value from the current [`Program`] and describes how to
//! present it as a [`View`]. Metrics are collected in a [`MetricRegistry`],
//! which evaluates all of them after each change of the program.

use log::{error, info, warn};

use crate::Program;

/// A named calculation over a program together with its presentation.
pub trait Metric {
    type Data;

    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> Option<&str> {
        None
    }
    fn calculate(&self, program: &Program) -> Result<Self::Data, MetricError>;
    fn render(&self, data: &Self::Data) -> View;
}

/// Object safe form of [`Metric`] used by the registry.
pub trait AnyMetric {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn evaluate(&self, program: &Program) -> Result<View, MetricError>;
}

impl<M: Metric> AnyMetric for M {
    fn id(&self) -> &str {
        Metric::id(self)
    }

    fn name(&self) -> &str {
        Metric::name(self)
    }

    fn description(&self) -> Option<&str> {
        Metric::description(self)
    }

    fn evaluate(&self, program: &Program) -> Result<View, MetricError> {
        let data = self.calculate(program)?;
        Ok(self.render(&data))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    #[error("metric definition is missing {0}")]
    Missing(&'static str),
    #[error("failed to calculate metric: {0}")]
    Calculation(String),
}

/// Renderer independent description of a metric's content.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Shown instead of content when there is nothing to display yet.
    Placeholder(String),
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<Cell>>,
    },
    Checklist(Vec<ChecklistItem>),
    Tiles(Vec<Tile>),
    Days(Vec<DayTile>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Muted,
    Warning,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChecklistItem {
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayTile {
    pub name: String,
    pub sets: usize,
    pub active: bool,
}

/// Result of evaluating one registered metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub content: Result<View, MetricError>,
}

#[derive(Default)]
pub struct MetricRegistry {
    metrics: Vec<Box<dyn AnyMetric>>,
}

impl MetricRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<M: Metric + 'static>(&mut self, metric: M) -> Result<(), MetricError> {
        self.register_boxed(Box::new(metric))
    }

    /// Add a metric, replacing any metric with the same id.
    ///
    /// Metrics without an id or name are rejected and leave the registry unchanged.
    pub fn register_boxed(&mut self, metric: Box<dyn AnyMetric>) -> Result<(), MetricError> {
        if metric.id().trim().is_empty() {
            error!("rejected metric without id");
            return Err(MetricError::Missing("id"));
        }
        if metric.name().trim().is_empty() {
            error!("rejected metric \"{}\" without name", metric.id());
            return Err(MetricError::Missing("name"));
        }
        if self.get(metric.id()).is_some() {
            warn!("metric \"{}\" already exists, overwriting", metric.id());
            self.unregister(metric.id());
        }
        info!("registered metric: {}", metric.name());
        self.metrics.push(metric);
        Ok(())
    }

    pub fn unregister(&mut self, id: &str) {
        self.metrics.retain(|m| m.id() != id);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn AnyMetric> {
        self.metrics
            .iter()
            .find(|m| m.id() == id)
            .map(AsRef::as_ref)
    }

    /// Registered metrics in registration order.
    pub fn all(&self) -> impl Iterator<Item = &dyn AnyMetric> {
        self.metrics.iter().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn clear(&mut self) {
        self.metrics.clear();
    }

    /// Evaluate every metric. A failing metric results in a card with an
    /// error and does not affect the other cards.
    #[must_use]
    pub fn evaluate(&self, program: &Program) -> Vec<Card> {
        self.all()
            .map(|metric| {
                let content = metric.evaluate(program);
                if let Err(ref err) = content {
                    error!("error calculating metric \"{}\": {err}", metric.name());
                }
                Card {
                    id: metric.id().to_string(),
                    name: metric.name().to_string(),
                    description: metric.description().map(ToString::to_string),
                    content,
                }
            })
            .collect()
    }
}

type Calculate<D> = Box<dyn Fn(&Program) -> Result<D, MetricError>>;
type Render<D> = Box<dyn Fn(&D) -> View>;

/// Metric defined by closures, created with [`MetricBuilder`].
pub struct CustomMetric<D> {
    id: String,
    name: String,
    description: Option<String>,
    calculate: Calculate<D>,
    render: Render<D>,
}

impl<D> Metric for CustomMetric<D> {
    type Data = D;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn calculate(&self, program: &Program) -> Result<D, MetricError> {
        (self.calculate)(program)
    }

    fn render(&self, data: &D) -> View {
        (self.render)(data)
    }
}

pub struct MetricBuilder<D> {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    calculate: Option<Calculate<D>>,
    render: Option<Render<D>>,
}

impl<D> Default for MetricBuilder<D> {
    fn default() -> Self {
        Self {
            id: None,
            name: None,
            description: None,
            calculate: None,
            render: None,
        }
    }
}

impl<D> MetricBuilder<D> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn calculate(
        mut self,
        calculate: impl Fn(&Program) -> Result<D, MetricError> + 'static,
    ) -> Self {
        self.calculate = Some(Box::new(calculate));
        self
    }

    #[must_use]
    pub fn render(mut self, render: impl Fn(&D) -> View + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    /// Fails on the first missing field, in the order id, name, calculate, render.
    pub fn build(self) -> Result<CustomMetric<D>, MetricError> {
        let id = self.id.filter(|id| !id.trim().is_empty());
        let name = self.name.filter(|name| !name.trim().is_empty());
        match (id, name, self.calculate, self.render) {
            (Some(id), Some(name), Some(calculate), Some(render)) => Ok(CustomMetric {
                id,
                name,
                description: self.description,
                calculate,
                render,
            }),
            (id, name, calculate, _) => {
                let missing = if id.is_none() {
                    "id"
                } else if name.is_none() {
                    "name"
                } else if calculate.is_none() {
                    "calculate"
                } else {
                    "render"
                };
                error!(
                    "rejected metric \"{}\" without {missing}",
                    id.as_deref().unwrap_or_default()
                );
                Err(MetricError::Missing(missing))
            }
        }
    }
}
