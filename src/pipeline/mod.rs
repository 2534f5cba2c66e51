//! Task graph: ordered phases with a barrier after each.
//!
//! ```text
//! clean -> fonts -> templates -> markup -> sitemap -> robots -> { styles | scripts | images }
//! ```
//!
//! Tasks of one phase run concurrently on the rayon pool. A failure lets the
//! rest of its phase finish, then aborts every later phase.

use anyhow::{Result, bail};
use rayon::prelude::*;

use crate::core::is_shutdown;
use crate::task::{self, Task, TaskContext, TaskReport};

/// Tasks that may run at the same time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub tasks: Vec<Task>,
}

impl Phase {
    fn new(tasks: &[Task]) -> Self {
        Self {
            tasks: tasks.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskGraph {
    pub phases: Vec<Phase>,
}

impl TaskGraph {
    /// The full build run before watch mode.
    pub fn default_build() -> Self {
        Self {
            phases: vec![
                Phase::new(&[Task::Clean]),
                Phase::new(&[Task::Fonts]),
                Phase::new(&[Task::Templates]),
                Phase::new(&[Task::Markup]),
                Phase::new(&[Task::Sitemap]),
                Phase::new(&[Task::Robots]),
                Phase::new(&[Task::Styles, Task::Scripts, Task::Images]),
            ],
        }
    }

    /// A graph of one task.
    pub fn single(task: Task) -> Self {
        Self {
            phases: vec![Phase::new(&[task])],
        }
    }

    /// Run every phase in order, returning all reports.
    pub fn run(&self, ctx: &TaskContext) -> Result<Vec<TaskReport>> {
        let mut reports = Vec::new();

        for phase in &self.phases {
            if is_shutdown() {
                bail!("interrupted");
            }

            let results: Vec<Result<TaskReport>> = match phase.tasks.as_slice() {
                [task] => vec![task::run(*task, ctx)],
                tasks => tasks.par_iter().map(|task| task::run(*task, ctx)).collect(),
            };

            for result in results {
                reports.push(result?);
            }
        }
        Ok(reports)
    }
}
