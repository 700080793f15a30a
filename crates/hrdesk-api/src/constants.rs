//! API constants.

/// Versioned API path prefix. All authenticated resource routes live under it;
/// health probes and the OpenAPI spec are served from the root.
pub const API_PREFIX: &str = "/api/v1";
