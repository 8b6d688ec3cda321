//! Burned-state evaluation.
//!
//! Pure: the verdict depends only on its inputs.

use crate::types::{AggregatedCategories, BurnReason, HealthStatus, HealthVerdict};

/// Word stems (lowercase) that mark a passive-DNS health label as bad.
const DNS_HEALTH_BAD_MARKERS: [&str; 4] = ["burned", "malicious", "suspicious", "unhealthy"];

/// Word stems (lowercase) that mark a mail reputation status as blacklisted.
const MAIL_BLACKLIST_MARKERS: [&str; 3] = ["blacklist", "blocklist", "spam"];

/// Words that cancel every marker after them in the same clause.
const NEGATIONS: [&str; 6] = ["no", "not", "non", "never", "without", "clean"];

const CLAUSE_SEPARATORS: [char; 5] = [',', ';', '.', '|', '\n'];

const EXPLANATION_SEPARATOR: &str = "; ";

/// Compute the verdict for one domain.
///
/// Every matching rule contributes a reason, in rule order: bad categories, DNS
/// health, mail reputation. Missing signals never count against the domain.
#[must_use]
pub fn evaluate(
    categories: &AggregatedCategories,
    health_dns: Option<&str>,
    mail_status: Option<&str>,
) -> HealthVerdict {
    let mut reasons = Vec::new();

    if categories.has_bad() {
        reasons.push(BurnReason::BadCategories(categories.bad.clone()));
    }
    if let Some(label) = health_dns.filter(|l| matches_marker(l, &DNS_HEALTH_BAD_MARKERS)) {
        reasons.push(BurnReason::DnsHealth(label.trim().to_string()));
    }
    if let Some(status) = mail_status.filter(|s| matches_marker(s, &MAIL_BLACKLIST_MARKERS)) {
        reasons.push(BurnReason::MailBlacklisted(status.trim().to_string()));
    }

    if reasons.is_empty() {
        return HealthVerdict {
            health: HealthStatus::Healthy,
            reasons,
            explanation: String::new(),
        };
    }

    let explanation = reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(EXPLANATION_SEPARATOR);

    HealthVerdict {
        health: HealthStatus::Burned,
        reasons,
        explanation,
    }
}

/// A marker matches a word that starts with it, unless a negation came earlier
/// in the same clause ("Not blacklisted", "No spam detected").
fn matches_marker(label: &str, markers: &[&str]) -> bool {
    let label = label.to_lowercase();
    label.split(CLAUSE_SEPARATORS).any(|clause| {
        let mut negated = false;
        for word in clause
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            if NEGATIONS.contains(&word) {
                negated = true;
            } else if !negated && markers.iter().any(|m| word.starts_with(m)) {
                return true;
            }
        }
        false
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::category_aggregator::aggregate;
    use crate::types::{Observation, ProviderId};

    fn categories(entries: &[(ProviderId, &str, bool)]) -> AggregatedCategories {
        let observations: Vec<_> = entries
            .iter()
            .map(|(p, c, bad)| Observation::new("example.com", *p, *c, *bad))
            .collect();
        aggregate(&observations)
    }

    #[test]
    fn bad_category_burns_and_names_the_category() {
        let verdict = evaluate(
            &categories(&[(ProviderId::Talos, "malware", true)]),
            None,
            None,
        );
        assert_eq!(verdict.health, HealthStatus::Burned);
        assert!(verdict.explanation.contains("malware"));
    }

    #[test]
    fn clean_inputs_are_healthy_with_empty_explanation() {
        let verdict = evaluate(
            &categories(&[(ProviderId::Talos, "business", false)]),
            Some("Healthy"),
            Some("Healthy"),
        );
        assert_eq!(verdict.health, HealthStatus::Healthy);
        assert!(verdict.explanation.is_empty());
        assert!(verdict.reasons.is_empty());
    }

    #[test]
    fn all_matching_reasons_are_concatenated_in_rule_order() {
        let verdict = evaluate(
            &categories(&[(ProviderId::Bluecoat, "phishing", true)]),
            Some("Suspicious"),
            Some("Spam blacklisted"),
        );
        assert_eq!(verdict.reasons.len(), 3);
        assert!(matches!(verdict.reasons[0], BurnReason::BadCategories(_)));
        assert!(matches!(verdict.reasons[1], BurnReason::DnsHealth(_)));
        assert!(matches!(verdict.reasons[2], BurnReason::MailBlacklisted(_)));
        assert_eq!(
            verdict.explanation,
            "Bad categories: phishing; \
             Passive DNS health flagged the domain: Suspicious; \
             Mail reputation reports blacklisting: Spam blacklisted"
        );
    }

    #[test]
    fn dns_health_alone_burns() {
        let verdict = evaluate(&AggregatedCategories::default(), Some("Unhealthy"), None);
        assert!(verdict.is_burned());
        assert_eq!(verdict.reasons, vec![BurnReason::DnsHealth("Unhealthy".to_string())]);
    }

    #[test]
    fn negated_statuses_stay_healthy() {
        let none = AggregatedCategories::default();
        for (health_dns, mail) in [
            ("Healthy", "Not blacklisted"),
            ("Not suspicious", "No spam detected"),
            ("non-malicious", "Clean, not on any blocklist"),
        ] {
            let verdict = evaluate(&none, Some(health_dns), Some(mail));
            assert_eq!(verdict.health, HealthStatus::Healthy, "{health_dns} / {mail}");
            assert!(verdict.reasons.is_empty());
        }
    }

    #[test]
    fn markers_must_start_a_word() {
        let verdict = evaluate(&AggregatedCategories::default(), Some("Healthy"), Some("Antispam OK"));
        assert_eq!(verdict.health, HealthStatus::Healthy);
    }

    #[test]
    fn negation_only_covers_its_own_clause() {
        let verdict = evaluate(
            &AggregatedCategories::default(),
            None,
            Some("Not on Spamhaus; listed on SORBS blacklist"),
        );
        assert!(verdict.is_burned());
        assert_eq!(
            verdict.reasons,
            vec![BurnReason::MailBlacklisted(
                "Not on Spamhaus; listed on SORBS blacklist".to_string()
            )]
        );
    }

    #[test]
    fn missing_signals_are_not_bad() {
        let verdict = evaluate(&AggregatedCategories::default(), None, None);
        assert_eq!(verdict.health, HealthStatus::Healthy);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let cats = categories(&[
            (ProviderId::Fortiguard, "Malicious Websites", true),
            (ProviderId::Talos, "Business", false),
        ]);
        let first = evaluate(&cats, Some("Healthy"), Some("Blacklisted"));
        let second = evaluate(&cats, Some("Healthy"), Some("Blacklisted"));
        assert_eq!(first, second);
    }
}
