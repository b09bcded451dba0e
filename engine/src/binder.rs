//! Command-line tokenizing and flag binding.
//!
//! Walks the argument list left to right. A token at a binding position
//! must match a known flag (primary or synonym); the binder then greedily
//! collects trailing parameters under the descriptor's arity rule. While
//! the minimum is unsatisfied, tokens are consumed unconditionally (even
//! flag-shaped ones); afterwards collection stops at the next recognized
//! flag. An unbounded maximum consumes until that boundary; a bounded one
//! lets excess non-flag tokens accumulate so they are reported as a count
//! violation rather than an unrecognized option.

use tracing::debug;

use option_resolver_core::{OptionTable, Source};

use crate::binding::{BindingSet, RawBinding};
use crate::error::{ResolveError, Result};

/// Binds every command-line token to a descriptor.
pub(crate) fn bind_command_line(table: &OptionTable, args: &[String]) -> Result<BindingSet> {
    let mut bound = BindingSet::new();
    let mut i = 0;

    while i < args.len() {
        let token = &args[i];
        let Some(descriptor) = table.by_flag(token) else {
            return Err(ResolveError::UnrecognizedOption {
                token: token.clone(),
            });
        };

        if let Some(existing) = bound.get(&descriptor.id) {
            let mut flags_used = existing.flags_used.clone();
            flags_used.push(token.clone());
            return Err(ResolveError::RepeatedOption {
                id: descriptor.id.clone(),
                flags_used,
            });
        }

        i += 1;
        let mut params: Vec<String> = Vec::new();
        while i < args.len() {
            if params.len() >= descriptor.min_params && table.is_flag(&args[i]) {
                break;
            }
            params.push(args[i].clone());
            i += 1;
        }

        if !descriptor.accepts(params.len()) {
            return Err(ResolveError::BadOptionParameterCount {
                id: descriptor.id.clone(),
                specifier: token.clone(),
                params,
                min: descriptor.min_params,
                max: descriptor.max_params,
            });
        }

        if descriptor.is_sensitive {
            debug!(id = %descriptor.id, flag = %token, params = params.len(), "Bound option (params redacted)");
        } else {
            debug!(id = %descriptor.id, flag = %token, params = ?params, "Bound option");
        }

        bound.insert(RawBinding {
            id: descriptor.id.clone(),
            source: Source::CommandLine,
            specifier: Some(token.clone()),
            raw_params: params,
            flags_used: vec![token.clone()],
        });
    }

    Ok(bound)
}
