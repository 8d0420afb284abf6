//! Cache and load-balancer key derivation.

use crate::routing::model::LoadBalancerOptions;

/// Load balancer type that pins clients by session cookie.
pub const STICKY_SESSIONS: &str = "CookieStickySessions";

/// Build the key a resolution is cached and load balanced under.
///
/// Sticky-session balancing groups every request carrying the same session
/// key, so the key ignores both template and method. Otherwise the key is
/// `"<template>|<method>"`; callers upper-case the method beforehand.
pub fn build_key(template: &str, method: &str, lb: &LoadBalancerOptions) -> String {
    if lb.is_sticky() {
        return format!("{}:{}", STICKY_SESSIONS, lb.key);
    }

    format!("{}|{}", template, method)
}
