use crate::{ActionKind, Actor, ActorError, ActorResult, CombinableOutput};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// An action kind whose actors prefix the action with their name.
pub struct EchoKind;

impl ActionKind for EchoKind {
    type Action = String;
    type Test = ();
    type Output = String;

    const NAME: &'static str = "echo";
}

impl CombinableOutput for String {
    fn neutral() -> Self {
        String::from("-")
    }

    fn combine(outputs: Vec<Self>) -> Self {
        outputs.join(" | ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    Accept,
    Reject,
    FailOnRun,
}

/// An actor that counts how often it was tested and run.
#[derive(Debug)]
pub struct EchoActor {
    name: String,
    behavior: Behavior,
    tests: AtomicUsize,
    runs: AtomicUsize,
}

impl EchoActor {
    fn new(name: &str, behavior: Behavior) -> Self {
        Self {
            name: name.to_owned(),
            behavior,
            tests: AtomicUsize::new(0),
            runs: AtomicUsize::new(0),
        }
    }

    pub fn accepting(name: &str) -> Self {
        Self::new(name, Behavior::Accept)
    }

    pub fn rejecting(name: &str) -> Self {
        Self::new(name, Behavior::Reject)
    }

    /// Passes its test but fails when being run.
    pub fn failing(name: &str) -> Self {
        Self::new(name, Behavior::FailOnRun)
    }

    pub fn tests(&self) -> usize {
        self.tests.load(Ordering::SeqCst)
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Actor<EchoKind> for EchoActor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn test(&self, _action: &String) -> ActorResult<()> {
        self.tests.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Accept | Behavior::FailOnRun => Ok(()),
            Behavior::Reject => ActorError::not_applicable(&self.name, "rejects everything"),
        }
    }

    async fn run(&self, action: &String) -> ActorResult<String> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Accept => Ok(format!("{}: {action}", self.name)),
            Behavior::Reject => ActorError::internal("Run without successful test"),
            Behavior::FailOnRun => Err(ActorError::execution("run failed")),
        }
    }
}
