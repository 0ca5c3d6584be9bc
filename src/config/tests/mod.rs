//! Unit tests for axionbot configuration loading.
//!
//! This module contains tests organised into:
//! - [`helpers`] - Shared fixtures and helper functions
//! - [`types_tests`] - Defaults, field enumeration and serialisation
//! - [`coercion_tests`] - Boolean and count coercion rules
//! - [`resolution_tests`] - Environment file path resolution
//! - [`layer_precedence_tests`] - File and environment layer precedence
//! - [`parser_injection_tests`] - Behaviour with injected parser doubles
//! - [`export_tests`] - String views handed to external processes
