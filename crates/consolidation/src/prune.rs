//! Best-effort removal of redundant fields.

use tracing::debug;

use grid_frame::Dataset;

/// Remove the configured redundant fields from the dataset if present.
///
/// Removal is best-effort and idempotent: absence of a field is not an
/// error, and running the pruner twice yields the same result as running
/// it once.
pub fn prune_fields(dataset: &mut Dataset, drop_vars: &[String]) {
    for name in drop_vars {
        if dataset.vars.remove(name).is_some() {
            debug!(field = %name, "dropped variable");
        }
        if dataset.aux.remove(name).is_some() {
            debug!(field = %name, "dropped auxiliary field");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_frame::{AuxField, Variable};
    use ndarray::Array3;

    fn dataset_with_redundant_fields() -> Dataset {
        let mut ds = Dataset {
            steps: vec![0, 3],
            lats: vec![-1.0, 0.0],
            lons: vec![0.0, 1.0],
            ..Default::default()
        };
        ds.vars.insert(
            "swh".to_string(),
            Variable::Grid3(Array3::zeros((2, 2, 2))),
        );
        ds.aux
            .insert("surface".to_string(), AuxField::Scalar(0.0));
        ds.aux.insert(
            "valid_time".to_string(),
            AuxField::PerStep(vec![0.0, 10800.0]),
        );
        ds
    }

    fn drop_list() -> Vec<String> {
        vec!["surface".to_string(), "valid_time".to_string()]
    }

    #[test]
    fn test_prune_removes_configured_fields() {
        let mut ds = dataset_with_redundant_fields();
        prune_fields(&mut ds, &drop_list());
        assert!(!ds.aux.contains_key("surface"));
        assert!(!ds.aux.contains_key("valid_time"));
        assert!(ds.vars.contains_key("swh"));
    }

    #[test]
    fn test_prune_is_idempotent() {
        let mut once = dataset_with_redundant_fields();
        prune_fields(&mut once, &drop_list());

        let mut twice = dataset_with_redundant_fields();
        prune_fields(&mut twice, &drop_list());
        prune_fields(&mut twice, &drop_list());

        assert_eq!(once.var_names(), twice.var_names());
        assert_eq!(once.aux, twice.aux);
    }

    #[test]
    fn test_prune_on_absent_fields_is_a_no_op() {
        let mut ds = dataset_with_redundant_fields();
        ds.aux.clear();
        prune_fields(&mut ds, &drop_list());
        assert!(ds.vars.contains_key("swh"));
    }
}
