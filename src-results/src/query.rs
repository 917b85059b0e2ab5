//! Aggregation of variant scores for the analytics view
//!
//! Pure functions over a [`StaticResultStore`]; nothing here mutates the
//! store or performs I/O.

use serde::Serialize;

use crate::methods::{CrossoverFilter, CrossoverMethod, SelectionMethod};
use crate::store::{StaticResultStore, VariantScore};

/// Combined scores of one function under the active filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSeries {
    /// Function key, e.g. "sphere"
    pub function: String,
    /// Display name of the canonical (exponential, sts) record
    pub name: String,
    /// Formula of the canonical (exponential, sts) record
    pub description: String,
    pub models: Vec<VariantScore>,
}

/// Series of every function that matched the filter, in request order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatedChartSeries {
    pub series: Vec<FunctionSeries>,
}

impl AggregatedChartSeries {
    pub fn get(&self, function: &str) -> Option<&FunctionSeries> {
        self.series.iter().find(|s| s.function == function)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FunctionSeries> {
        self.series.iter()
    }
}

/// Drop repeated selection methods, keeping the first occurrence
fn distinct_selections(enabled: &[SelectionMethod]) -> Vec<SelectionMethod> {
    let mut out: Vec<SelectionMethod> = Vec::with_capacity(enabled.len());
    for &s in enabled {
        if !out.contains(&s) {
            out.push(s);
        }
    }
    out
}

impl StaticResultStore {
    /// Combine the scores of each function across the enabled selections and
    /// the crossover methods of `filter`.
    ///
    /// Order: selections as given, crossovers in enumeration order, variants
    /// in record order. Functions without any score are left out. Name and
    /// description always come from the (exponential, sts) record, whatever
    /// combinations contributed; a function lacking that record is left out.
    pub fn aggregate<S: AsRef<str>>(
        &self,
        function_names: &[S],
        filter: CrossoverFilter,
        enabled: &[SelectionMethod],
    ) -> AggregatedChartSeries {
        let selections = distinct_selections(enabled);
        let crossovers = filter.methods();
        let mut series = Vec::new();

        for function in function_names {
            let function: &str = function.as_ref();
            let mut models: Vec<VariantScore> = Vec::new();
            for &selection in &selections {
                for &crossover in &crossovers {
                    if let Some(record) = self.lookup(crossover, selection, function) {
                        models.extend(record.variant_scores.iter().cloned());
                    }
                }
            }
            if models.is_empty() {
                continue;
            }

            let Some(base) =
                self.lookup(CrossoverMethod::Exponential, SelectionMethod::Sts, function)
            else {
                log::debug!("{function}: no exponential/sts record, skipping aggregate");
                continue;
            };

            series.push(FunctionSeries {
                function: function.to_string(),
                name: base.function_name.clone(),
                description: base.math_description.clone(),
                models,
            });
        }

        AggregatedChartSeries { series }
    }

    /// [`aggregate`](Self::aggregate) over every function of the store
    pub fn aggregate_all(
        &self,
        filter: CrossoverFilter,
        enabled: &[SelectionMethod],
    ) -> AggregatedChartSeries {
        self.aggregate(self.function_names(), filter, enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ResultRecord, StoreBuilder};

    const VARIANTS: [&str; 10] = [
        "DE/best/1",
        "DE/best/2",
        "DE/best/3",
        "DE/current-to-best/1",
        "DE/current-to-best/2",
        "DE/current-to-rand/1",
        "DE/current-to-rand/2",
        "rand/1",
        "rand/2",
        "rand/3",
    ];

    fn full_record(name: &str, c: CrossoverMethod, s: SelectionMethod, base: f64) -> ResultRecord {
        ResultRecord {
            function_name: name.to_string(),
            math_description: format!("desc of {name} under {c}/{s}"),
            variant_scores: VARIANTS
                .iter()
                .enumerate()
                .map(|(i, v)| VariantScore {
                    variant_name: v.to_string(),
                    selection_method: s,
                    crossover_method: c,
                    mean_best_fitness: base + i as f64,
                })
                .collect(),
        }
    }

    /// sphere recorded for every crossover under sts, and exponential/greedy
    fn dense_store() -> StaticResultStore {
        let mut builder = StoreBuilder::new();
        for (i, c) in CrossoverMethod::ALL.into_iter().enumerate() {
            let name = if c == CrossoverMethod::Exponential {
                "Sphere Function"
            } else {
                "Sphere (other)"
            };
            builder
                .insert(
                    c,
                    SelectionMethod::Sts,
                    "sphere",
                    full_record(name, c, SelectionMethod::Sts, 100.0 * i as f64),
                )
                .unwrap();
        }
        builder
            .insert(
                CrossoverMethod::Exponential,
                SelectionMethod::Greedy,
                "sphere",
                full_record("Sphere greedy", CrossoverMethod::Exponential, SelectionMethod::Greedy, 1000.0),
            )
            .unwrap();
        builder
            .insert(
                CrossoverMethod::Binomial,
                SelectionMethod::Greedy,
                "orphan",
                full_record("Orphan", CrossoverMethod::Binomial, SelectionMethod::Greedy, 0.0),
            )
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_all_crossovers_concatenated_in_enumeration_order() {
        let store = dense_store();
        let out = store.aggregate(&["sphere"], CrossoverFilter::All, &[SelectionMethod::Sts]);
        let sphere = out.get("sphere").unwrap();
        assert_eq!(sphere.models.len(), 40);

        let crossovers: Vec<CrossoverMethod> = sphere
            .models
            .chunks(10)
            .map(|chunk| {
                assert!(chunk.iter().all(|m| m.crossover_method == chunk[0].crossover_method));
                chunk[0].crossover_method
            })
            .collect();
        assert_eq!(crossovers, CrossoverMethod::ALL.to_vec());
        // native variant order inside each record
        assert_eq!(sphere.models[10].variant_name, "DE/best/1");
        assert_eq!(sphere.models[19].variant_name, "rand/3");
    }

    #[test]
    fn test_selection_order_follows_caller() {
        let store = dense_store();
        let out = store.aggregate(
            &["sphere"],
            CrossoverFilter::Only(CrossoverMethod::Exponential),
            &[SelectionMethod::Greedy, SelectionMethod::Sts],
        );
        let models = &out.get("sphere").unwrap().models;
        assert_eq!(models.len(), 20);
        assert_eq!(models[0].selection_method, SelectionMethod::Greedy);
        assert_eq!(models[10].selection_method, SelectionMethod::Sts);
    }

    #[test]
    fn test_repeated_selection_counted_once() {
        let store = dense_store();
        let out = store.aggregate(
            &["sphere"],
            CrossoverFilter::Only(CrossoverMethod::Binomial),
            &[SelectionMethod::Sts, SelectionMethod::Sts],
        );
        assert_eq!(out.get("sphere").unwrap().models.len(), 10);
    }

    // Known inconsistency kept on purpose: the labels come from the
    // exponential/sts record even when only other combinations contributed.
    #[test]
    fn test_name_taken_from_canonical_record() {
        let store = dense_store();
        let out = store.aggregate(
            &["sphere"],
            CrossoverFilter::Only(CrossoverMethod::TwoPoint),
            &[SelectionMethod::Sts],
        );
        let sphere = out.get("sphere").unwrap();
        assert!(sphere.models.iter().all(|m| m.crossover_method == CrossoverMethod::TwoPoint));
        assert_eq!(sphere.name, "Sphere Function");
        assert_eq!(sphere.description, "desc of Sphere Function under exponential/sts");
    }

    #[test]
    fn test_function_without_scores_omitted() {
        let store = dense_store();
        let out = store.aggregate(
            &["sphere"],
            CrossoverFilter::Only(CrossoverMethod::OnePoint),
            &[SelectionMethod::Greedy],
        );
        assert!(out.is_empty());

        let none_enabled = store.aggregate(&["sphere"], CrossoverFilter::All, &[]);
        assert!(none_enabled.is_empty());
    }

    #[test]
    fn test_function_without_canonical_record_omitted() {
        let store = dense_store();
        let out = store.aggregate(
            &["orphan", "sphere"],
            CrossoverFilter::All,
            &[SelectionMethod::Greedy],
        );
        assert_eq!(out.len(), 1);
        assert!(out.get("orphan").is_none());
        assert_eq!(out.series[0].function, "sphere");
    }

    #[test]
    fn test_store_untouched_by_aggregate() {
        let store = dense_store();
        let before = store.lookup(CrossoverMethod::Exponential, SelectionMethod::Sts, "sphere").cloned();
        let _ = store.aggregate_all(CrossoverFilter::All, &SelectionMethod::ALL);
        let after = store.lookup(CrossoverMethod::Exponential, SelectionMethod::Sts, "sphere").cloned();
        assert_eq!(before, after);
    }
}
