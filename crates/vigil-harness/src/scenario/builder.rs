//! Scenario builder API.
//!
//! Provides a declarative API for constructing scenario tests that enforce
//! the Oracle Pattern.

use vigil_app::{Driver, Runtime};
use vigil_core::{ActivityTracker, ReconnectPolicy, TrackerConfig, ValidatorRegistry};
use vigil_proto::ValidatorPubkey;

use crate::{
    frames,
    scenario::{OracleFn, World},
    sim_driver::SimDriver,
};

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Connection established
    Connect,
    /// Inbound frame
    Frame(Vec<u8>),
}

/// Scenario builder.
///
/// Add validators and script steps, then call `.oracle()` to get a
/// [`RunnableScenario`].
pub struct Scenario {
    name: String,
    validators: Vec<ValidatorPubkey>,
    config: TrackerConfig,
    steps: Vec<Step>,
    failing: Vec<ValidatorPubkey>,
}

impl Scenario {
    /// Create a new scenario with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            validators: Vec::new(),
            config: TrackerConfig::default(),
            steps: Vec::new(),
            failing: Vec::new(),
        }
    }

    /// Add a monitored validator. Registry order is the order of calls.
    pub fn validator(mut self, pubkey: ValidatorPubkey) -> Self {
        self.validators.push(pubkey);
        self
    }

    /// Set how known liveness is treated on reconnect.
    pub fn reconnect_policy(mut self, policy: ReconnectPolicy) -> Self {
        self.config.reconnect = policy;
        self
    }

    /// Fail every send addressed to this validator.
    pub fn fail_sends_for(mut self, pubkey: ValidatorPubkey) -> Self {
        self.failing.push(pubkey);
        self
    }

    /// Script a connection-established event.
    pub fn connect(mut self) -> Self {
        self.steps.push(Step::Connect);
        self
    }

    /// Script an arbitrary inbound frame.
    pub fn frame(mut self, frame: Vec<u8>) -> Self {
        self.steps.push(Step::Frame(frame));
        self
    }

    /// Script a `validator_status` frame.
    pub fn status(self, pubkey: ValidatorPubkey, code: &str) -> Self {
        self.frame(frames::validator_status(&pubkey, code))
    }

    /// Script an `epoch` frame.
    pub fn epoch(self) -> Self {
        self.frame(frames::epoch())
    }

    /// Set the oracle function and return a runnable scenario.
    ///
    /// The oracle is mandatory - you cannot run a scenario without
    /// verification.
    pub fn oracle(self, oracle: OracleFn) -> RunnableScenario {
        RunnableScenario { scenario: self, oracle }
    }
}

/// A scenario with an oracle function that can be executed.
pub struct RunnableScenario {
    scenario: Scenario,
    oracle: OracleFn,
}

impl RunnableScenario {
    /// Execute the scenario.
    ///
    /// Every step is queued on a [`SimDriver`] and pulled through the real
    /// runtime one event at a time. Messages are attributed to the step that
    /// produced them. The oracle then verifies the final [`World`].
    pub fn run(self) -> Result<(), String> {
        let name = self.scenario.name;

        let executor = tokio::runtime::Builder::new_current_thread()
            .build()
            .map_err(|e| format!("Scenario '{name}': failed to build executor: {e}"))?;

        let mut driver = SimDriver::new();
        for pubkey in self.scenario.failing {
            driver.fail_sends_for(pubkey);
        }
        for step in self.scenario.steps {
            match step {
                Step::Connect => driver.push_connected(),
                Step::Frame(frame) => driver.push_frame(frame),
            }
        }

        let registry = ValidatorRegistry::new(self.scenario.validators);
        let tracker = ActivityTracker::new(registry, self.scenario.config);
        let mut runtime = Runtime::new(driver, tracker);

        let sent_by_step = executor.block_on(async {
            let mut sent_by_step = Vec::new();
            while let Some(event) = runtime.driver_mut().next_event().await {
                runtime.step(event).await;
                sent_by_step.push(runtime.driver_mut().take_sent());
            }
            sent_by_step
        });

        let failed_sends = runtime.driver().failed_attempts();
        let stats = runtime.stats();
        let world = World::new(runtime.tracker().clone(), stats, sent_by_step, failed_sends);

        (self.oracle)(&world).map_err(|e| format!("Scenario '{name}': {e}"))
    }
}
