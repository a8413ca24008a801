//! Built-in sample flows, loadable as full graph replacements.

use crate::convert::ConvertOptions;
use crate::error::FlowError;
use crate::layout::LayoutConfig;
use crate::parse::Direction;
use crate::sync::apply_text;
use scribe_canvas::store::FlowStore;

pub struct SampleFlow {
    pub id: &'static str,
    pub name: &'static str,
    pub source: &'static str,
}

pub const SAMPLE_FLOWS: &[SampleFlow] = &[
    SampleFlow {
        id: "lead-qualification",
        name: "Lead qualification",
        source: "graph TD
    A([New lead submitted]) --> B[Enrich contact via API]
    B --> C{Budget over threshold?}
    C -->|Yes| D[Create deal in Salesforce]
    C -->|No| E[Add to nurture campaign]
    D --> F[Notify sales on Slack]
    E --> G([Done])
    F --> G
",
    },
    SampleFlow {
        id: "order-fulfillment",
        name: "Order fulfillment",
        source: "graph TD
    A([Order placed]) --> B[Charge payment in Stripe]
    B --> C{Payment accepted?}
    C -->|Yes| D[Reserve stock]
    C -->|No| E[Email customer]
    D --> F[Wait for warehouse pick]
    F --> G[Ship order]
    G --> H([Order complete])
    E --> H
",
    },
    SampleFlow {
        id: "incident-escalation",
        name: "Incident escalation",
        source: "graph LR
    A([Alert fired]) --> B{Severity?}
    B -->|High| C[Page on-call]
    B -->|Low| D[Create Jira ticket]
    subgraph triage [Triage]
        C --> E[Acknowledge]
        E --> F{Resolved in 30 min?}
    end
    F -->|No| G[Escalate to manager]
    F -->|Yes| H([Close incident])
    D --> H
    G --> H
",
    },
];

pub fn find_sample(id: &str) -> Option<&'static SampleFlow> {
    SAMPLE_FLOWS.iter().find(|s| s.id == id)
}

/// Loads a named sample into the store as a full replacement.
pub fn load_sample(
    store: &mut FlowStore,
    id: &str,
    opts: &ConvertOptions,
    layout_cfg: &LayoutConfig,
) -> Result<Direction, FlowError> {
    let sample = find_sample(id).ok_or_else(|| FlowError::UnknownSample { id: id.to_string() })?;
    tracing::info!(sample = sample.id, "loading sample flow");
    apply_text(store, sample.source, opts, layout_cfg)
}
