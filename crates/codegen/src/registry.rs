use std::collections::{HashMap, HashSet};

/// Per-run record of assigned codes.
///
/// The first occurrence of a base code keeps it; the n-th occurrence becomes
/// `{base}-{n}` (so the second is `-2`). The registry is an explicit value owned
/// by one generation run: two runs never share one, and a fresh run starts
/// empty. Sharing one across threads requires external ordering, since the
/// order of registration decides which duplicate gets which suffix.
#[derive(Debug, Clone, Default)]
pub struct CodeRegistry {
    occurrences: HashMap<String, u32>,
    assigned: HashSet<String>,
}

impl CodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a unique code for `base`, recording it.
    pub fn register(&mut self, base: &str) -> String {
        let count = self.occurrences.entry(base.to_string()).or_insert(0);
        *count += 1;

        let mut candidate = if *count == 1 {
            base.to_string()
        } else {
            format!("{base}-{count}")
        };
        // A suffixed code can coincide with another row's base code.
        while self.assigned.contains(&candidate) {
            *count += 1;
            candidate = format!("{base}-{count}");
        }

        self.assigned.insert(candidate.clone());
        candidate
    }

    pub fn contains(&self, code: &str) -> bool {
        self.assigned.contains(code)
    }

    /// Number of codes assigned so far.
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
