/// Formats a coordinate slice for log output, e.g. `[0.50, 1.25]`.
pub struct DisplayCoords<'a>(pub &'a [f64]);

impl std::fmt::Display for DisplayCoords<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c:.2}")?;
        }
        write!(f, "]")
    }
}

/// Sorts a slice of indices into the canonical key used for facet bookkeeping.
pub fn canonical(indices: &[usize]) -> Vec<usize> {
    let mut key = indices.to_vec();
    key.sort_unstable();
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_coords() {
        assert_eq!(DisplayCoords(&[0.5, 1.25]).to_string(), "[0.50, 1.25]");
        assert_eq!(DisplayCoords(&[]).to_string(), "[]");
    }

    #[test]
    fn test_canonical() {
        assert_eq!(canonical(&[3, 1, 2]), vec![1, 2, 3]);
    }
}
