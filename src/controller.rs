//! Reactive wiring between input controls and chart regions.
//!
//! Each view is registered with the output region it fills and the controls it
//! reads. A control-change event runs every view subscribed to that control, in
//! registration order, and yields the replacement figure per output region.

use std::collections::{BTreeMap, HashMap};
use std::panic::{self, AssertUnwindSafe};

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::chart::Figure;
use crate::data::filter::{PayloadRange, SiteSelection};
use crate::error::DispatchError;
use crate::state::{DashboardState, FilterSelection};
use crate::ui::layout::{PAYLOAD_SLIDER, SITE_DROPDOWN};

pub type View = Box<dyn Fn(&DashboardState, &FilterSelection) -> Figure>;

/// Output region id → new figure.
pub type Outputs = BTreeMap<String, Figure>;

struct Registration {
    output: String,
    view: View,
}

#[derive(Default)]
pub struct Controller {
    registrations: Vec<Registration>,
    /// control id → indices into `registrations`
    subscriptions: HashMap<String, Vec<usize>>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill `output` with `view` whenever any of `inputs` changes.
    pub fn register<F>(&mut self, output: &str, inputs: &[&str], view: F) -> &mut Self
    where
        F: Fn(&DashboardState, &FilterSelection) -> Figure + 'static,
    {
        let idx = self.registrations.len();
        for input in inputs {
            self.subscriptions
                .entry(input.to_string())
                .or_default()
                .push(idx);
        }
        self.registrations.push(Registration {
            output: output.to_string(),
            view: Box::new(view),
        });
        self
    }

    /// Output ids that depend on `control`, in registration order.
    pub fn subscribers(&self, control: &str) -> Vec<&str> {
        self.subscriptions
            .get(control)
            .map(|idxs| {
                idxs.iter()
                    .map(|&i| self.registrations[i].output.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Recompute every output subscribed to the changed control.
    pub fn dispatch(
        &self,
        state: &DashboardState,
        event: &ControlEvent,
    ) -> Result<Outputs, DispatchError> {
        let idxs = self
            .subscriptions
            .get(&event.changed)
            .ok_or_else(|| DispatchError::UnknownControl(event.changed.clone()))?;

        log::debug!(
            "dispatch {} → {:?} for {:?}",
            event.changed,
            self.subscribers(&event.changed),
            event.selection
        );

        idxs.iter()
            .map(|&i| self.run(&self.registrations[i], state, &event.selection))
            .collect()
    }

    /// Run every registration once, as on first page load.
    pub fn render_all(
        &self,
        state: &DashboardState,
        selection: &FilterSelection,
    ) -> Result<Outputs, DispatchError> {
        self.registrations
            .iter()
            .map(|r| self.run(r, state, selection))
            .collect()
    }

    fn run(
        &self,
        reg: &Registration,
        state: &DashboardState,
        selection: &FilterSelection,
    ) -> Result<(String, Figure), DispatchError> {
        // A panicking view must not take the server down with it.
        panic::catch_unwind(AssertUnwindSafe(|| (reg.view)(state, selection)))
            .map(|fig| {
                log::debug!("{} ← \"{}\"", reg.output, fig.title());
                (reg.output.clone(), fig)
            })
            .map_err(|payload| {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "view panicked".to_string());
                log::error!("view for '{}' failed: {message}", reg.output);
                DispatchError::ViewFailed {
                    output: reg.output.clone(),
                    message,
                }
            })
    }
}

// ---------------------------------------------------------------------------
// Control-change events
// ---------------------------------------------------------------------------

/// One change on the page: which control moved plus the current value of
/// every control.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlEvent {
    pub changed: String,
    pub selection: FilterSelection,
}

/// Event as posted by the page. Values stay untyped until validated so a bad
/// value can be reported against the control it came from.
#[derive(Debug, Deserialize)]
pub struct RawEvent {
    pub changed: String,
    pub site: JsonValue,
    pub payload: JsonValue,
}

impl TryFrom<RawEvent> for ControlEvent {
    type Error = DispatchError;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let site = match raw.site {
            JsonValue::String(s) => SiteSelection::from(s),
            other => {
                return Err(DispatchError::InvalidValue {
                    control: SITE_DROPDOWN.to_string(),
                    reason: format!("expected a site name, got {other}"),
                });
            }
        };

        let payload: [f64; 2] =
            serde_json::from_value(raw.payload).map_err(|e| DispatchError::InvalidValue {
                control: PAYLOAD_SLIDER.to_string(),
                reason: format!("expected [low, high]: {e}"),
            })?;

        Ok(ControlEvent {
            changed: raw.changed,
            selection: FilterSelection {
                site,
                payload: PayloadRange::from(payload),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::FigureLayout;
    use crate::data::model::tests::two_site_dataset;

    fn titled(text: &str) -> Figure {
        Figure {
            data: Vec::new(),
            layout: FigureLayout::titled(text),
        }
    }

    fn controller() -> Controller {
        let mut c = Controller::new();
        c.register("pie", &["dropdown"], |_, sel| titled(&format!("pie {}", sel.site)))
            .register("scatter", &["dropdown", "slider"], |_, sel| {
                titled(&format!("scatter {} {}", sel.payload.low, sel.payload.high))
            });
        c
    }

    fn event(changed: &str) -> ControlEvent {
        ControlEvent {
            changed: changed.to_string(),
            selection: FilterSelection {
                site: SiteSelection::from("A"),
                payload: PayloadRange::new(1000.0, 2000.0),
            },
        }
    }

    #[test]
    fn test_subscription_map() {
        let c = controller();
        assert_eq!(c.subscribers("dropdown"), vec!["pie", "scatter"]);
        assert_eq!(c.subscribers("slider"), vec!["scatter"]);
        assert!(c.subscribers("other").is_empty());
    }

    #[test]
    fn test_dispatch_runs_only_subscribers() {
        let state = DashboardState::new(two_site_dataset());
        let c = controller();

        let out = c.dispatch(&state, &event("slider")).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out["scatter"].title(), "scatter 1000 2000");

        let out = c.dispatch(&state, &event("dropdown")).unwrap();
        assert_eq!(out.keys().collect::<Vec<_>>(), vec!["pie", "scatter"]);
        assert_eq!(out["pie"].title(), "pie A");
    }

    #[test]
    fn test_unknown_control() {
        let state = DashboardState::new(two_site_dataset());
        let err = controller().dispatch(&state, &event("nope")).unwrap_err();
        assert_eq!(err, DispatchError::UnknownControl("nope".into()));
    }

    #[test]
    fn test_render_all() {
        let state = DashboardState::new(two_site_dataset());
        let out = controller()
            .render_all(&state, &state.initial_selection())
            .unwrap();
        assert_eq!(out["pie"].title(), "pie ALL");
        assert_eq!(out["scatter"].title(), "scatter 500 9600");
    }

    #[test]
    fn test_panicking_view_is_reported() {
        let state = DashboardState::new(two_site_dataset());
        let mut c = Controller::new();
        c.register("broken", &["dropdown"], |_, _| panic!("boom"));
        let err = c.dispatch(&state, &event("dropdown")).unwrap_err();
        assert_eq!(
            err,
            DispatchError::ViewFailed {
                output: "broken".into(),
                message: "boom".into()
            }
        );
    }

    #[test]
    fn test_raw_event_validation() {
        let raw: RawEvent = serde_json::from_str(
            r#"{"changed": "payload-slider", "site": "ALL", "payload": [0, 5000]}"#,
        )
        .unwrap();
        let ev = ControlEvent::try_from(raw).unwrap();
        assert_eq!(ev.selection.site, SiteSelection::All);
        assert_eq!(ev.selection.payload, PayloadRange::new(0.0, 5000.0));

        let raw: RawEvent =
            serde_json::from_str(r#"{"changed": "x", "site": 3, "payload": [0, 1]}"#).unwrap();
        assert!(matches!(
            ControlEvent::try_from(raw),
            Err(DispatchError::InvalidValue { control, .. }) if control == SITE_DROPDOWN
        ));

        let raw: RawEvent =
            serde_json::from_str(r#"{"changed": "x", "site": "A", "payload": [5]}"#).unwrap();
        assert!(matches!(
            ControlEvent::try_from(raw),
            Err(DispatchError::InvalidValue { control, .. }) if control == PAYLOAD_SLIDER
        ));
    }
}
