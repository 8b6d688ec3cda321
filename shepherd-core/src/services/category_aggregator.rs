//! Category aggregation across reputation providers.

use crate::types::{AggregatedCategories, Observation, ProviderId};

/// Merge one domain's observations into display categories, bad categories and
/// per-provider slots.
///
/// Providers are walked in [`ProviderId::ALL`] order so the output does not
/// depend on the order lookups completed in. Labels are deduplicated
/// case-insensitively, keeping the first spelling seen. A provider without an
/// observation (or with a blank label) keeps an empty slot and never contributes
/// to `bad`.
#[must_use]
pub fn aggregate(observations: &[Observation]) -> AggregatedCategories {
    let mut result = AggregatedCategories::default();

    for provider in ProviderId::ALL {
        let Some(obs) = observations
            .iter()
            .find(|o| o.provider == provider && !o.category.trim().is_empty())
        else {
            continue;
        };

        let label = obs.category.trim().to_string();
        push_unique(&mut result.all, &label);
        if obs.is_bad {
            push_unique(&mut result.bad, &label);
        }
        result.slots.set(provider, Some(label));
    }

    result
}

fn push_unique(list: &mut Vec<String>, label: &str) {
    if !list.iter().any(|l| l.eq_ignore_ascii_case(label)) {
        list.push(label.to_string());
    }
}
