pub mod admin;
pub mod protected;
pub mod public;

use serde::Deserialize;

use crate::config;

/// Ad hoc per-route row cap: `?take=N`, clamped to the configured maximum.
#[derive(Debug, Deserialize)]
pub struct TakeQuery {
    pub take: Option<i64>,
}

pub fn take_limit(query: &TakeQuery) -> i64 {
    let api = &config::config().api;
    match query.take {
        Some(n) if n > 0 => n.min(api.max_take),
        _ => api.default_take,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_defaults_and_clamps() {
        let api = &crate::config::config().api;
        assert_eq!(take_limit(&TakeQuery { take: None }), api.default_take);
        assert_eq!(take_limit(&TakeQuery { take: Some(0) }), api.default_take);
        assert_eq!(take_limit(&TakeQuery { take: Some(-3) }), api.default_take);
        assert_eq!(take_limit(&TakeQuery { take: Some(5) }), 5);
        assert_eq!(
            take_limit(&TakeQuery { take: Some(api.max_take + 1000) }),
            api.max_take
        );
    }
}
