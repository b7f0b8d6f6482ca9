//! Sink contract for log output destinations
//!
//! A sink accepts one chunk of rendered text at a time together with an
//! optional completion callback. Sinks come in two shapes: a type
//! implementing [`Sink`], or a bare function with the same signature.
//! [`SinkTarget`] holds either one and the logger dispatches on it.

use super::error::Result;
use std::fmt;
use std::sync::Arc;

/// Invoked once the sink has handed the data to its transport
pub type Completion = Box<dyn FnOnce(Result<()>) + Send + 'static>;

/// Function-shaped sink
pub type SinkFn = dyn Fn(&[u8], Option<Completion>) + Send + Sync;

pub trait Sink: Send + Sync {
    /// Write one chunk; failures are reported through `done`, never returned
    fn write(&self, data: &[u8], done: Option<Completion>);

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Call `done` with `result` if a callback was supplied
pub fn complete(done: Option<Completion>, result: Result<()>) {
    if let Some(done) = done {
        done(result);
    }
}

/// A sink bound to one or more levels
#[derive(Clone)]
pub enum SinkTarget {
    Writer(Arc<dyn Sink>),
    Func(Arc<SinkFn>),
}

impl SinkTarget {
    pub fn writer<S: Sink + 'static>(sink: S) -> Self {
        SinkTarget::Writer(Arc::new(sink))
    }

    pub fn shared(sink: Arc<dyn Sink>) -> Self {
        SinkTarget::Writer(sink)
    }

    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&[u8], Option<Completion>) + Send + Sync + 'static,
    {
        SinkTarget::Func(Arc::new(f))
    }

    pub fn write(&self, data: &[u8], done: Option<Completion>) {
        match self {
            SinkTarget::Writer(sink) => sink.write(data, done),
            SinkTarget::Func(f) => f(data, done),
        }
    }

    pub fn flush(&self) -> Result<()> {
        match self {
            SinkTarget::Writer(sink) => sink.flush(),
            SinkTarget::Func(_) => Ok(()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SinkTarget::Writer(sink) => sink.name(),
            SinkTarget::Func(_) => "function",
        }
    }

    fn same_as(&self, other: &SinkTarget) -> bool {
        match (self, other) {
            (SinkTarget::Writer(a), SinkTarget::Writer(b)) => Arc::ptr_eq(a, b),
            (SinkTarget::Func(a), SinkTarget::Func(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for SinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SinkTarget").field(&self.name()).finish()
    }
}

/// Sinks indexed by level rank
///
/// A single broadcast sink serves every rank. A per-level list may be
/// shorter than the level table or contain gaps; ranks without an entry
/// have no sink and their messages are dropped.
#[derive(Debug, Clone)]
pub enum Streams {
    Broadcast(SinkTarget),
    PerLevel(Vec<Option<SinkTarget>>),
}

impl Streams {
    pub fn broadcast(target: SinkTarget) -> Self {
        Streams::Broadcast(target)
    }

    pub fn per_level<I>(targets: I) -> Self
    where
        I: IntoIterator<Item = Option<SinkTarget>>,
    {
        Streams::PerLevel(targets.into_iter().collect())
    }

    pub fn for_rank(&self, rank: usize) -> Option<&SinkTarget> {
        match self {
            Streams::Broadcast(target) => Some(target),
            Streams::PerLevel(targets) => targets.get(rank).and_then(Option::as_ref),
        }
    }

    /// Bind `target` to `rank`, growing a per-level list as needed
    ///
    /// A broadcast sink is first expanded to `level_count` explicit entries.
    pub fn bind(&mut self, rank: usize, target: SinkTarget, level_count: usize) {
        if let Streams::Broadcast(current) = self {
            let current = current.clone();
            *self = Streams::PerLevel(vec![Some(current); level_count.max(rank + 1)]);
        }
        if let Streams::PerLevel(targets) = self {
            if targets.len() <= rank {
                targets.resize(rank + 1, None);
            }
            targets[rank] = Some(target);
        }
    }

    /// Flush every distinct sink once, returning the first failure
    pub fn flush_all(&self) -> Result<()> {
        let mut seen: Vec<&SinkTarget> = Vec::new();
        let mut first_err = None;
        let targets: Vec<&SinkTarget> = match self {
            Streams::Broadcast(target) => vec![target],
            Streams::PerLevel(targets) => targets.iter().flatten().collect(),
        };
        for target in targets {
            if seen.iter().any(|s| s.same_as(target)) {
                continue;
            }
            seen.push(target);
            if let Err(e) = target.flush() {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
