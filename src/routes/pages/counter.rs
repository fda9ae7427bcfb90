#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::http::StatusCode;
use poem::web::{Data, Query};
use poem::{handler, Response};
use serde::Deserialize;

use crate::routes::pages::html_response;
use crate::utils::errors::Errors;
use crate::utils::site::SiteState;

// ***************************************************************************
//                                 Counter
// ***************************************************************************
/** The counter's state is the value carried in the query string.  Every
 * transition is computed here and rendered as a link to the next state.
 */
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counter(i64);

impl Counter {
    pub fn new(value: i64) -> Self {
        Counter(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    pub fn increment(self) -> Self {
        Counter(self.0.saturating_add(1))
    }

    pub fn decrement(self) -> Self {
        Counter(self.0.saturating_sub(1))
    }

    pub fn reset(self) -> Self {
        Counter::default()
    }
}

#[derive(Deserialize, Debug)]
pub struct CounterQuery {
    count: Option<i64>,
}

pub fn render_counter(state: &SiteState, current: Counter) -> Result<String, Errors> {
    let mut ctx = state.context();
    ctx.insert("count", &current.value());
    ctx.insert("increment", &current.increment().value());
    ctx.insert("decrement", &current.decrement().value());
    ctx.insert("reset", &current.reset().value());
    state.render("counter.html", &ctx)
}

#[handler]
pub fn counter(state: Data<&Arc<SiteState>>, Query(q): Query<CounterQuery>) -> Response {
    let current = Counter::new(q.count.unwrap_or_default());
    html_response(render_counter(&state, current), StatusCode::OK)
}
