//! Caller-facing plan generation.
//!
//! [`MealPlanGenerator`] tries the external service first and falls back to
//! the offline planner on any failure, so plan generation always yields a
//! usable plan. The fallback is an explicit `Result` combinator rather than
//! error swallowing deep in the call chain.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::corpus::{Corpus, sample_reference_set, search_local};
use crate::error::{PlanError, Result};
use crate::identify::identify;
use crate::llm::{JsonShape, TextGenerator, extract_json, prompts};
use crate::models::{CalorieBudget, CandidatePlan, FoodCandidate, GoalProfile, MealPlan};
use crate::planner::{plan_offline, reconcile};

/// Where a generated plan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    External,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPlan {
    pub plan: MealPlan,
    pub source: PlanSource,
}

pub struct MealPlanGenerator {
    corpus: Arc<Corpus>,
    service: Option<Arc<dyn TextGenerator>>,
    rng: Mutex<Box<dyn RngCore + Send>>,
    timeout: Option<Duration>,
}

impl MealPlanGenerator {
    /// Offline-only generator with an entropy-seeded random source.
    pub fn new(corpus: Arc<Corpus>) -> Self {
        Self {
            corpus,
            service: None,
            rng: Mutex::new(Box::new(StdRng::from_entropy())),
            timeout: None,
        }
    }

    pub fn with_service(mut self, service: Arc<dyn TextGenerator>) -> Self {
        self.service = Some(service);
        self
    }

    pub fn with_random<R: RngCore + Send + 'static>(mut self, rng: R) -> Self {
        self.rng = Mutex::new(Box::new(rng));
        self
    }

    /// Bound every external call; expiry counts as a service failure.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn is_online(&self) -> bool {
        self.service.is_some()
    }

    /// Generate a plan for `target` kcal. Never fails.
    pub async fn generate_plan(&self, target: f64, goal: GoalProfile) -> MealPlan {
        self.generate_plan_with_source(target, goal).await.plan
    }

    /// Generate a plan and report which path produced it.
    #[instrument(skip(self), fields(online = self.is_online()))]
    pub async fn generate_plan_with_source(&self, target: f64, goal: GoalProfile) -> GeneratedPlan {
        let budget = CalorieBudget::new(target);

        let external = self
            .request_plan(&budget, goal)
            .await
            .map(|candidate| reconcile(&candidate, &self.corpus, budget.target));

        match external {
            Ok(plan) => {
                info!(total = plan.total_calories(), "plan generated by external service");
                GeneratedPlan {
                    plan,
                    source: PlanSource::External,
                }
            }
            Err(e) => {
                warn!(error = %e, "external plan unavailable, using offline planner");
                let plan = plan_offline(&self.corpus, &mut **self.lock_rng(), budget.target);
                GeneratedPlan {
                    plan,
                    source: PlanSource::Offline,
                }
            }
        }
    }

    /// Request and decode a candidate plan from the external service.
    ///
    /// A fresh reference sample is drawn for every call. A reply with no
    /// meal items at all is treated as malformed.
    pub async fn request_plan(&self, budget: &CalorieBudget, goal: GoalProfile) -> Result<CandidatePlan> {
        let service = self.service()?;

        let request = {
            let mut rng = self.lock_rng();
            let reference = sample_reference_set(&self.corpus, &mut **rng);
            prompts::plan_request(budget, goal, &reference)
        };

        let completion = self.bounded(service.complete(&request)).await??;
        let candidate = CandidatePlan::from_value(extract_json(&completion, JsonShape::Object)?)?;

        if candidate.item_count() == 0 {
            return Err(PlanError::MalformedResponse("plan has no meal items".to_string()));
        }
        Ok(candidate)
    }

    /// Identify foods matching free text. Never fails; empty on any error.
    pub async fn identify_food(&self, query: &str) -> Vec<FoodCandidate> {
        let Ok(service) = self.service() else {
            warn!("food identification needs a text-generation service");
            return Vec::new();
        };

        match self.bounded(identify(service.as_ref(), query)).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "food identification failed");
                Vec::new()
            }
        }
    }

    /// Search the local corpus first; identify externally only when it has
    /// no match.
    #[instrument(skip(self))]
    pub async fn search_food(&self, query: &str) -> Vec<FoodCandidate> {
        let local = search_local(&self.corpus, query);
        if !local.is_empty() {
            info!(count = local.len(), "found foods in local corpus");
            return local;
        }
        self.identify_food(query).await
    }

    fn service(&self) -> Result<Arc<dyn TextGenerator>> {
        self.service
            .clone()
            .ok_or_else(|| PlanError::ExternalService("no text-generation service configured".to_string()))
    }

    fn lock_rng(&self) -> MutexGuard<'_, Box<dyn RngCore + Send>> {
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `future` under the configured timeout, if any.
    async fn bounded<F: Future>(&self, future: F) -> Result<F::Output> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, future)
                .await
                .map_err(|_| PlanError::ExternalService(format!("request timed out after {:?}", limit))),
            None => Ok(future.await),
        }
    }
}
