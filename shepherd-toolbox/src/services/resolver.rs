//! Shared DNS resolver construction.

use std::net::IpAddr;
use std::sync::LazyLock;

use hickory_resolver::{
    config::{NameServerConfigGroup, ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
    TokioResolver,
};

/// Shared default DNS resolver.
///
/// Uses the host system configuration (e.g. `/etc/resolv.conf`); if that cannot be
/// loaded it falls back to Hickory's default upstream set.
pub(crate) static DEFAULT_RESOLVER: LazyLock<TokioResolver> = LazyLock::new(build_system_resolver);

/// Build a resolver that targets a specific nameserver IP, or the system
/// configuration when `ns_ip` is `None`.
pub(crate) fn build_resolver_for_ns(ns_ip: Option<IpAddr>) -> TokioResolver {
    if let Some(ns_ip) = ns_ip {
        let config = ResolverConfig::from_parts(
            None,
            vec![],
            NameServerConfigGroup::from_ips_clear(&[ns_ip], 53, true),
        );
        return TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
            .with_options(ResolverOpts::default())
            .build();
    }

    build_system_resolver()
}

fn build_system_resolver() -> TokioResolver {
    #[cfg(any(unix, target_os = "windows"))]
    {
        match TokioResolver::builder_tokio() {
            Ok(builder) => return builder.build(),
            Err(e) => {
                log::warn!(
                    "Failed to load system DNS configuration, falling back to defaults: {e}"
                );
            }
        }
    }

    TokioResolver::builder_with_config(
        ResolverConfig::default(),
        TokioConnectionProvider::default(),
    )
    .with_options(ResolverOpts::default())
    .build()
}
