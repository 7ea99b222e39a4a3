//! Sequence-axis expansion into plain 3-D fields.

use ndarray::s;
use tracing::debug;

use grid_frame::{Dataset, Variable};

/// Flatten the configured sequence variables.
///
/// Each candidate present with a sequence axis of length K is replaced by
/// K plain `(step, lat, lon)` variables named `{name}_0` … `{name}_{K-1}`
/// — candidate-list order, then ascending component index. Once no
/// variable uses the axis any more, its coordinate values are dropped so
/// no dangling dimension remains. If the dataset never had the axis the
/// call is a no-op, and the whole operation is idempotent.
pub fn flatten_sequences(dataset: &mut Dataset, candidates: &[String]) {
    if !dataset.has_sequence_axis() {
        return;
    }

    for name in candidates {
        match dataset.vars.remove(name) {
            Some(Variable::Grid4(block)) => {
                let k = block.shape()[1];
                for i in 0..k {
                    let component = block.slice(s![.., i, .., ..]).to_owned();
                    dataset
                        .vars
                        .insert(format!("{name}_{i}"), Variable::Grid3(component));
                }
                debug!(variable = %name, components = k, "flattened sequence variable");
            }
            // Present but already plain: leave it untouched.
            Some(other) => {
                dataset.vars.insert(name.clone(), other);
            }
            None => {}
        }
    }

    let still_uses = dataset.vars.values().any(Variable::uses_sequence_axis);
    if !still_uses {
        dataset.seq_values = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array3, Array4};

    fn candidates() -> Vec<String> {
        vec!["shts".to_string(), "mpts".to_string(), "swdir".to_string()]
    }

    fn dataset_with_sequence(k: usize) -> Dataset {
        let mut ds = Dataset {
            steps: vec![0, 3],
            lats: vec![-1.0, 0.0],
            lons: vec![0.0, 1.0],
            seq_values: Some((0..k as u32).collect()),
            ..Default::default()
        };
        ds.vars.insert(
            "shts".to_string(),
            Variable::Grid4(Array4::from_shape_fn((2, k, 2, 2), |(_, c, _, _)| c as f32)),
        );
        ds.vars.insert(
            "swh".to_string(),
            Variable::Grid3(Array3::zeros((2, 2, 2))),
        );
        ds
    }

    #[test]
    fn test_flatten_produces_k_components() {
        let mut ds = dataset_with_sequence(3);
        flatten_sequences(&mut ds, &candidates());

        assert!(!ds.vars.contains_key("shts"));
        for i in 0..3 {
            let name = format!("shts_{i}");
            let var = ds.vars.get(&name).unwrap_or_else(|| panic!("missing {name}"));
            assert_eq!(var.seq_len(), None);
            assert_eq!(var.step_len(), 2);
        }
    }

    #[test]
    fn test_flatten_slices_the_right_component() {
        let mut ds = dataset_with_sequence(3);
        flatten_sequences(&mut ds, &candidates());

        for i in 0..3u32 {
            let Variable::Grid3(a) = &ds.vars[&format!("shts_{i}")] else {
                panic!("expected Grid3");
            };
            assert!(a.iter().all(|&v| v == i as f32));
        }
    }

    #[test]
    fn test_axis_dropped_once_unused() {
        let mut ds = dataset_with_sequence(3);
        flatten_sequences(&mut ds, &candidates());
        assert!(!ds.has_sequence_axis());
        assert_eq!(ds.seq_values, None);
        assert_eq!(ds.dim_names(), vec!["step", "latitude", "longitude"]);
    }

    #[test]
    fn test_axis_kept_while_noncandidate_still_uses_it() {
        let mut ds = dataset_with_sequence(3);
        ds.vars.insert(
            "other".to_string(),
            Variable::Grid4(Array4::zeros((2, 3, 2, 2))),
        );
        flatten_sequences(&mut ds, &candidates());
        // The candidate is flattened, but the axis survives for `other`.
        assert!(!ds.vars.contains_key("shts"));
        assert!(ds.has_sequence_axis());
        assert_eq!(ds.seq_values, Some(vec![0, 1, 2]));
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let mut ds = dataset_with_sequence(3);
        flatten_sequences(&mut ds, &candidates());
        let names_once = ds.var_names().join(",");

        flatten_sequences(&mut ds, &candidates());
        assert_eq!(ds.var_names().join(","), names_once);
    }

    #[test]
    fn test_no_sequence_axis_is_a_no_op() {
        let mut ds = dataset_with_sequence(3);
        ds.vars.remove("shts");
        ds.seq_values = None;

        let before = ds.var_names().join(",");
        flatten_sequences(&mut ds, &candidates());
        assert_eq!(ds.var_names().join(","), before);
    }
}
