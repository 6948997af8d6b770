use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use yew::functional::Reducible;

use crate::models::{
    error::AppError,
    measurement::{MeasurementQuery, MeasurementResult, SlotMeasurement},
    options::{CityOption, ParameterOption, Slot},
};

/// Load status of one of the dropdown option lists.
#[derive(Clone, PartialEq, Debug)]
pub enum OptionsState<T> {
    Loading,
    Loaded(Rc<[T]>),
    Unavailable,
}

impl<T> OptionsState<T> {
    /// Returns true if the list is still being fetched
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the loaded options, or an empty slice
    pub fn items(&self) -> &[T] {
        match self {
            Self::Loaded(items) => &**items,
            _ => &[],
        }
    }

    fn from_result(result: Result<Vec<T>, AppError>, error: &mut Option<AppError>) -> Self {
        match result {
            Ok(items) => Self::Loaded(items.into()),
            Err(e) => {
                *error = Some(e);
                Self::Unavailable
            }
        }
    }
}

/// The user's current choices: one city per slot and one parameter.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Selection {
    cities: BTreeMap<Slot, String>,
    parameter: Option<String>,
}

impl Selection {
    /// Sets the city for `slot`; an empty id clears the slot.
    pub fn set_city(&mut self, slot: Slot, city: impl Into<String>) {
        let city = city.into();
        if city.is_empty() {
            self.cities.remove(&slot);
        } else {
            self.cities.insert(slot, city);
        }
    }

    /// Sets the parameter; an empty name clears it.
    pub fn set_parameter(&mut self, parameter: impl Into<String>) {
        let parameter = parameter.into();
        self.parameter = (!parameter.is_empty()).then_some(parameter);
    }

    pub fn city(&self, slot: Slot) -> Option<&str> {
        self.cities.get(&slot).map(String::as_str)
    }

    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    /// True iff every slot holds a distinct city and a parameter is chosen.
    pub fn can_compare(&self) -> bool {
        self.comparison_request().is_ok()
    }

    /// Validates the selection into one query per slot, in slot order.
    pub fn comparison_request(&self) -> Result<ComparisonRequest, AppError> {
        let parameter = self
            .parameter
            .clone()
            .ok_or(AppError::IncompleteSelection)?;

        let queries = Slot::all()
            .iter()
            .map(|&slot| {
                self.city(slot)
                    .map(|city| MeasurementQuery {
                        slot,
                        city: city.to_string(),
                        parameter: parameter.clone(),
                    })
                    .ok_or(AppError::IncompleteSelection)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let distinct: HashSet<&str> = queries.iter().map(|q| q.city.as_str()).collect();
        if distinct.len() < queries.len() {
            return Err(AppError::DuplicateCity);
        }

        Ok(ComparisonRequest { parameter, queries })
    }
}

/// A validated comparison; only obtainable through [`Selection::comparison_request`].
#[derive(Clone, PartialEq, Debug)]
pub struct ComparisonRequest {
    parameter: String,
    queries: Vec<MeasurementQuery>,
}

impl ComparisonRequest {
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    pub fn queries(&self) -> &[MeasurementQuery] {
        &self.queries
    }
}

/// Identifies one dispatched comparison so late results can be recognised.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct BatchId(pub u64);

impl BatchId {
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum Action {
    CitiesLoaded(Result<Vec<CityOption>, AppError>),
    ParametersLoaded(Result<Vec<ParameterOption>, AppError>),
    SelectCity(Slot, String),
    SelectParameter(String),
    ComparisonRejected(AppError),
    ComparisonStarted(BatchId),
    ComparisonFinished {
        batch: BatchId,
        outcome: Result<Vec<SlotMeasurement>, AppError>,
    },
    DismissError,
}

/// Whole page state; every transition goes through [`Reducible::reduce`].
#[derive(Clone, PartialEq, Debug)]
pub struct AppState {
    pub cities: OptionsState<CityOption>,
    pub parameters: OptionsState<ParameterOption>,
    pub selection: Selection,
    pub results: Rc<[SlotMeasurement]>,
    pub error: Option<AppError>,
    pub in_flight: Option<BatchId>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cities: OptionsState::Loading,
            parameters: OptionsState::Loading,
            selection: Selection::default(),
            results: Rc::from([]),
            error: None,
            in_flight: None,
        }
    }
}

impl AppState {
    pub fn can_compare(&self) -> bool {
        self.selection.can_compare()
    }

    pub const fn is_comparing(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns the published measurement for `slot`, if any
    pub fn result_for(&self, slot: Slot) -> Option<&MeasurementResult> {
        self.results
            .iter()
            .find(|r| r.slot == slot)
            .map(|r| &r.measurement)
    }
}

impl Reducible for AppState {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();

        match action {
            Action::CitiesLoaded(result) => {
                next.cities = OptionsState::from_result(result, &mut next.error);
            }
            Action::ParametersLoaded(result) => {
                next.parameters = OptionsState::from_result(result, &mut next.error);
            }
            Action::SelectCity(slot, city) => next.selection.set_city(slot, city),
            Action::SelectParameter(parameter) => next.selection.set_parameter(parameter),
            Action::ComparisonRejected(error) => {
                next.results = Rc::from([]);
                next.error = Some(error);
                next.in_flight = None;
            }
            Action::ComparisonStarted(batch) => {
                next.results = Rc::from([]);
                next.error = None;
                next.in_flight = Some(batch);
            }
            Action::ComparisonFinished { batch, outcome } => {
                if next.in_flight != Some(batch) {
                    return self;
                }
                next.in_flight = None;
                match outcome {
                    Ok(results) => next.results = results.into(),
                    Err(error) => next.error = Some(error),
                }
            }
            Action::DismissError => next.error = None,
        }

        Rc::new(next)
    }
}
