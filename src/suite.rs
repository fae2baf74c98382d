//! Sequential scenario runner

use log::{debug, error, info};

/// Result of one scenario run
#[derive(Debug, Clone)]
pub struct ScenarioOutcome
{   pub name: String
  , pub result: Result<(), crate::error::Error>
}

impl ScenarioOutcome
{   pub fn passed(&self) -> bool
    {   self.result.is_ok()
    }
}

/// Outcomes of a suite run, in execution order
#[derive(Debug, Clone, Default)]
pub struct SuiteReport
{   pub outcomes: Vec<ScenarioOutcome>
}

impl SuiteReport
{   pub fn passed(&self) -> usize
    {   self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize
    {   self.outcomes.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool
    {   self.failed() == 0
    }

    pub fn failures(&self) -> Vec<&ScenarioOutcome>
    {   self.outcomes.iter().filter(|o| !o.passed()).collect()
    }

    pub fn outcome(&self, name: &str) -> Option<&ScenarioOutcome>
    {   self.outcomes.iter().find(|o| o.name == name)
    }
}

/// Owns the shared client for the lifetime of a suite
pub struct ConformanceSuite
{   client: crate::client::ConformanceClient
}

impl ConformanceSuite
{   /// Acquire the client. Must be called inside a tokio runtime.
    pub fn new(
      config: &crate::config::HarnessConfig
    ) -> Result<Self, crate::error::Error>
    {   debug!("Creating ConformanceSuite for {}", config.endpoint);
        Ok(ConformanceSuite
        {   client: crate::client::ConformanceClient::new(config)?
        })
    }

    pub fn client(&self) -> &crate::client::ConformanceClient
    {   &self.client
    }

    /// Send the probe and verify the expectation; single attempt
    pub async fn run_scenario(
      &self
    , scenario: &crate::scenario::Scenario
    ) -> ScenarioOutcome
    {   debug!("Running scenario {}", scenario.name);
        let exchange = match &scenario.probe
        {   crate::scenario::Probe::Prompt(prompt) => {
              self.client.submit_prompt(prompt.clone()).await
            }
          , crate::scenario::Probe::Health => {
              self.client.check_health().await
            }
          , crate::scenario::Probe::Preflight => {
              self.client.preflight().await
            }
        };

        let result = exchange
          .and_then(|e| scenario.expectation.verify(&e));

        match &result
        {   Ok(()) => info!("PASS {}", scenario.name)
          , Err(e) => error!("FAIL {}: {}", scenario.name, e)
        }

        ScenarioOutcome
        {   name: scenario.name.clone()
          , result
        }
    }

    /// Run every scenario in order; one failure never stops the rest
    pub async fn run(
      &self
    , scenarios: &[crate::scenario::Scenario]
    ) -> SuiteReport
    {   info!("Running {} scenarios", scenarios.len());
        let mut report = SuiteReport::default();
        for scenario in scenarios
        {   report.outcomes.push(self.run_scenario(scenario).await);
        }
        info!(
          "{} passed, {} failed",
          report.passed(), report.failed()
        );
        report
    }

    /// Repeat one scenario; each run must satisfy the same expectation
    pub async fn run_repeated(
      &self
    , scenario: &crate::scenario::Scenario
    , times: usize
    ) -> SuiteReport
    {   debug!("Repeating {} x{}", scenario.name, times);
        let mut report = SuiteReport::default();
        for attempt in 0..times
        {   let mut outcome = self.run_scenario(scenario).await;
            outcome.name = format!("{}#{}", scenario.name, attempt + 1);
            report.outcomes.push(outcome);
        }
        report
    }

    /// Release the client
    pub async fn shutdown(self)
      -> Result<(), crate::error::Error>
    {   debug!("Shutting down ConformanceSuite");
        self.client.shutdown().await
    }
}
