#[cfg(test)]
mod tests {
    use air_compare::models::{
        error::{AppError, ErrorKind},
        measurement::{MeasurementQuery, MeasurementResult, SlotMeasurement},
        options::{CityOption, ParameterOption, Slot},
    };
    use air_compare::services::compare::run_comparison;
    use air_compare::state::{Action, AppState, BatchId, OptionsState, Selection};
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::future::Future;
    use std::pin::Pin;
    use std::rc::Rc;
    use std::task::{Context, Poll};
    use yew::functional::Reducible;

    // Future that stays pending for a fixed number of polls
    struct Delay {
        remaining: u32,
    }

    impl Future for Delay {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.remaining == 0 {
                Poll::Ready(())
            } else {
                self.remaining -= 1;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    fn measurement(city: &str, value: f64) -> MeasurementResult {
        MeasurementResult {
            city: city.to_string(),
            value,
            unit: "µg/m³".to_string(),
            parameter: "pm25".to_string(),
            location: None,
            last_updated: None,
        }
    }

    fn selection(first: &str, second: &str, parameter: &str) -> Selection {
        let mut selection = Selection::default();
        selection.set_city(Slot::First, first);
        selection.set_city(Slot::Second, second);
        selection.set_parameter(parameter);
        selection
    }

    fn reduce(state: AppState, action: Action) -> AppState {
        (*Rc::new(state).reduce(action)).clone()
    }

    fn published(results: &[(Slot, &str)]) -> Vec<SlotMeasurement> {
        results
            .iter()
            .map(|&(slot, city)| SlotMeasurement {
                slot,
                measurement: measurement(city, 10.0),
            })
            .collect()
    }

    // ===== Error Type Tests =====

    #[test]
    fn test_duplicate_city_display() {
        let error = AppError::DuplicateCity;
        assert_eq!(error.to_string(), "Please select cities of different names");
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_no_data_display_names_slots_and_parameter() {
        let error = AppError::NoData {
            slots: vec![Slot::First, Slot::Second],
            parameter: "o3".to_string(),
        };
        assert_eq!(error.to_string(), "No o3 measurement available for city 1, 2");
        assert_eq!(error.kind(), ErrorKind::NoData);
    }

    #[test]
    fn test_upstream_error_display() {
        let error = AppError::Upstream {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(error.to_string(), "Upstream error 503: unavailable");
        assert_eq!(error.kind(), ErrorKind::Transport);
    }

    // ===== Selection Tests =====

    #[test]
    fn test_compare_disabled_until_complete() {
        let mut selection = Selection::default();
        assert!(!selection.can_compare());

        selection.set_city(Slot::First, "Chicago");
        assert!(!selection.can_compare());

        selection.set_city(Slot::Second, "Denver");
        assert!(!selection.can_compare());

        selection.set_parameter("pm25");
        assert!(selection.can_compare());

        selection.set_parameter("");
        assert!(!selection.can_compare());
    }

    #[test]
    fn test_compare_disabled_for_same_city() {
        assert!(!selection("Chicago", "Chicago", "pm25").can_compare());
        assert!(selection("Chicago", "Denver", "pm25").can_compare());
    }

    #[test]
    fn test_set_city_replaces_only_its_slot() {
        let mut selection = selection("Chicago", "Denver", "pm25");
        selection.set_city(Slot::Second, "Boston");

        assert_eq!(selection.city(Slot::First), Some("Chicago"));
        assert_eq!(selection.city(Slot::Second), Some("Boston"));
        assert_eq!(selection.parameter(), Some("pm25"));

        selection.set_city(Slot::First, "");
        assert_eq!(selection.city(Slot::First), None);
        assert!(!selection.can_compare());
    }

    #[test]
    fn test_comparison_request_in_slot_order() {
        let request = selection("Chicago", "Denver", "pm25")
            .comparison_request()
            .unwrap();

        assert_eq!(request.parameter(), "pm25");
        let queries: Vec<_> = request
            .queries()
            .iter()
            .map(|q| (q.slot, q.city.as_str(), q.parameter.as_str()))
            .collect();
        assert_eq!(
            queries,
            [
                (Slot::First, "Chicago", "pm25"),
                (Slot::Second, "Denver", "pm25")
            ]
        );
    }

    #[test]
    fn test_comparison_request_rejects_incomplete() {
        let mut selection = Selection::default();
        selection.set_city(Slot::First, "Chicago");
        selection.set_parameter("pm25");

        assert_eq!(
            selection.comparison_request(),
            Err(AppError::IncompleteSelection)
        );
    }

    // ===== Comparison Runner Tests =====

    #[test]
    fn test_duplicate_cities_issue_no_request() {
        let fetches = Cell::new(0);
        let selection = selection("Chicago", "Chicago", "pm25");

        let outcome = match selection.comparison_request() {
            Ok(request) => block_on(run_comparison(&request, |_query| {
                fetches.set(fetches.get() + 1);
                async { Ok(None) }
            })),
            Err(e) => Err(e),
        };

        let error = outcome.unwrap_err();
        assert_eq!(error, AppError::DuplicateCity);
        assert!(error.to_string().contains("different names"));
        assert_eq!(fetches.get(), 0);
    }

    #[test]
    fn test_results_follow_slot_order_not_settle_order() {
        let request = selection("Chicago", "Denver", "pm25")
            .comparison_request()
            .unwrap();
        let settled = RefCell::new(Vec::new());
        let settled_ref = &settled;

        let results = block_on(run_comparison(&request, move |query: MeasurementQuery| {
            // Chicago settles well after Denver
            let polls = if query.slot == Slot::First { 5 } else { 0 };
            async move {
                Delay { remaining: polls }.await;
                settled_ref.borrow_mut().push(query.city.clone());
                Ok(Some(measurement(&query.city, 12.5)))
            }
        }))
        .unwrap();

        assert_eq!(*settled.borrow(), ["Denver", "Chicago"]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].slot, Slot::First);
        assert_eq!(results[0].measurement.city, "Chicago");
        assert_eq!(results[1].slot, Slot::Second);
        assert_eq!(results[1].measurement.city, "Denver");
    }

    #[test]
    fn test_missing_record_names_slot_and_parameter() {
        let request = selection("Chicago", "Denver", "pm25")
            .comparison_request()
            .unwrap();

        let outcome = block_on(run_comparison(&request, |query: MeasurementQuery| async move {
            if query.city == "Denver" {
                Ok(None)
            } else {
                Ok(Some(measurement(&query.city, 8.0)))
            }
        }));

        let error = outcome.unwrap_err();
        assert_eq!(
            error,
            AppError::NoData {
                slots: vec![Slot::Second],
                parameter: "pm25".to_string()
            }
        );
        let message = error.to_string();
        assert!(message.contains("city 2"));
        assert!(message.contains("pm25"));
    }

    #[test]
    fn test_single_transport_failure_fails_batch() {
        let request = selection("Chicago", "Denver", "pm25")
            .comparison_request()
            .unwrap();
        let fetches = Cell::new(0);

        let outcome = block_on(run_comparison(&request, |query: MeasurementQuery| {
            fetches.set(fetches.get() + 1);
            async move {
                if query.slot == Slot::First {
                    Err(AppError::Transport("Network error: connection reset".to_string()))
                } else {
                    Ok(Some(measurement(&query.city, 8.0)))
                }
            }
        }));

        assert_eq!(fetches.get(), 2);
        assert_eq!(
            outcome.unwrap_err().to_string(),
            "Network error: connection reset"
        );
    }

    // ===== Reducer Tests =====

    #[test]
    fn test_options_loaded_into_lists() {
        let state = reduce(
            AppState::default(),
            Action::CitiesLoaded(Ok(vec![
                CityOption {
                    id: "Chicago".to_string(),
                },
                CityOption {
                    id: "Denver".to_string(),
                },
            ])),
        );
        let state = reduce(
            state,
            Action::ParametersLoaded(Ok(vec![ParameterOption {
                name: "pm25".to_string(),
                display_name: "PM2.5".to_string(),
            }])),
        );

        assert_eq!(state.cities.items().len(), 2);
        assert_eq!(state.parameters.items().len(), 1);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_option_load_failure_is_degraded_not_fatal() {
        let error = AppError::Upstream {
            status: 500,
            body: "boom".to_string(),
        };
        let state = reduce(AppState::default(), Action::CitiesLoaded(Err(error.clone())));

        assert_eq!(state.cities, OptionsState::Unavailable);
        assert!(state.cities.items().is_empty());
        assert!(state.parameters.is_loading());
        assert_eq!(state.error, Some(error));
    }

    #[test]
    fn test_rejected_comparison_clears_results() {
        let mut state = AppState::default();
        state.results = published(&[(Slot::First, "Chicago"), (Slot::Second, "Denver")]).into();
        state.in_flight = Some(BatchId(3));

        let state = reduce(state, Action::ComparisonRejected(AppError::DuplicateCity));

        assert!(state.results.is_empty());
        assert_eq!(state.error, Some(AppError::DuplicateCity));
        assert!(!state.is_comparing());
    }

    #[test]
    fn test_started_comparison_clears_stale_state() {
        let mut state = AppState::default();
        state.results = published(&[(Slot::First, "Chicago"), (Slot::Second, "Denver")]).into();
        state.error = Some(AppError::DuplicateCity);

        let state = reduce(state, Action::ComparisonStarted(BatchId(1)));

        assert!(state.results.is_empty());
        assert!(state.error.is_none());
        assert!(state.is_comparing());
    }

    #[test]
    fn test_finished_comparison_publishes_results() {
        let state = reduce(AppState::default(), Action::ComparisonStarted(BatchId(1)));
        let state = reduce(
            state,
            Action::ComparisonFinished {
                batch: BatchId(1),
                outcome: Ok(published(&[(Slot::First, "Chicago"), (Slot::Second, "Denver")])),
            },
        );

        assert!(!state.is_comparing());
        assert_eq!(state.result_for(Slot::First).unwrap().city, "Chicago");
        assert_eq!(state.result_for(Slot::Second).unwrap().city, "Denver");
    }

    #[test]
    fn test_failed_comparison_publishes_nothing() {
        let no_data = AppError::NoData {
            slots: vec![Slot::Second],
            parameter: "pm25".to_string(),
        };
        let state = reduce(AppState::default(), Action::ComparisonStarted(BatchId(1)));
        let state = reduce(
            state,
            Action::ComparisonFinished {
                batch: BatchId(1),
                outcome: Err(no_data.clone()),
            },
        );

        assert!(state.results.is_empty());
        assert_eq!(state.error, Some(no_data));
    }

    #[test]
    fn test_superseded_batch_is_discarded() {
        let state = reduce(AppState::default(), Action::ComparisonStarted(BatchId(1)));
        let state = reduce(state, Action::ComparisonStarted(BatchId(2)));
        let state = reduce(
            state,
            Action::ComparisonFinished {
                batch: BatchId(1),
                outcome: Ok(published(&[(Slot::First, "Boston"), (Slot::Second, "Austin")])),
            },
        );

        assert!(state.results.is_empty());
        assert_eq!(state.in_flight, Some(BatchId(2)));

        let state = reduce(
            state,
            Action::ComparisonFinished {
                batch: BatchId(2),
                outcome: Ok(published(&[(Slot::First, "Chicago"), (Slot::Second, "Denver")])),
            },
        );
        assert_eq!(state.result_for(Slot::First).unwrap().city, "Chicago");
    }

    #[test]
    fn test_select_actions_update_enablement() {
        let state = reduce(
            AppState::default(),
            Action::SelectCity(Slot::First, "Chicago".to_string()),
        );
        let state = reduce(state, Action::SelectCity(Slot::Second, "Chicago".to_string()));
        let state = reduce(state, Action::SelectParameter("pm25".to_string()));
        assert!(!state.can_compare());

        let state = reduce(state, Action::SelectCity(Slot::Second, "Denver".to_string()));
        assert!(state.can_compare());
    }

    #[test]
    fn test_dismiss_clears_error_only() {
        let mut state = AppState::default();
        state.error = Some(AppError::DuplicateCity);
        state.selection = selection("Chicago", "Denver", "pm25");

        let state = reduce(state, Action::DismissError);

        assert!(state.error.is_none());
        assert!(state.can_compare());
    }

    #[test]
    fn test_reading_uses_raw_value_and_unit() {
        let m = MeasurementResult {
            unit: "ppm".to_string(),
            ..measurement("Denver", 0.0305)
        };
        assert_eq!(m.reading(), "0.0305 ppm");
    }
}
