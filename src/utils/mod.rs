pub mod constants;
pub mod errors;

pub fn pluralize(count: usize, singular: &str) -> String {
    if count == 1 {
        singular.to_string()
    } else {
        format!("{singular}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(0, "command"), "commands");
        assert_eq!(pluralize(1, "command"), "command");
        assert_eq!(pluralize(2, "event listener"), "event listeners");
    }
}
