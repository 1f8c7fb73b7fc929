use indexmap::IndexMap;

use crate::document::{Parameter, ParameterLocation};

/// Operation parameters grouped by location, each group keeping declaration order.
#[derive(Debug, Default)]
pub struct ClassifiedParameters<'a> {
    groups: IndexMap<&'a ParameterLocation, Vec<&'a Parameter>>,
}

impl<'a> ClassifiedParameters<'a> {
    /// The parameters declared for a location.
    pub fn get(&self, location: &ParameterLocation) -> &[&'a Parameter] {
        self.groups
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The path parameters.
    pub fn path(&self) -> &[&'a Parameter] {
        self.get(&ParameterLocation::Path)
    }

    /// The query parameters.
    pub fn query(&self) -> &[&'a Parameter] {
        self.get(&ParameterLocation::Query)
    }

    /// The locations seen, in order of first appearance.
    pub fn locations(&self) -> impl Iterator<Item = &'a ParameterLocation> + '_ {
        self.groups.keys().copied()
    }
}

/// Groups parameters by their `in` location.
///
/// No validation happens here: unknown locations get their own group, which the
/// URL builder never reads.
pub fn classify_parameters(parameters: &[Parameter]) -> ClassifiedParameters<'_> {
    let mut groups = IndexMap::<_, Vec<_>>::new();
    for parameter in parameters {
        groups.entry(&parameter.location).or_default().push(parameter);
    }
    ClassifiedParameters { groups }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, location: ParameterLocation) -> Parameter {
        Parameter {
            name: name.to_string(),
            location,
            required: true,
            schema: None,
        }
    }

    fn names(parameters: &[&Parameter]) -> Vec<String> {
        parameters.iter().map(|param| param.name.clone()).collect()
    }

    #[test]
    fn should_group_by_location_keeping_order() {
        let parameters = vec![
            param("size", ParameterLocation::Query),
            param("id", ParameterLocation::Path),
            param("page", ParameterLocation::Query),
            param("x-trace", ParameterLocation::Header),
            param("org", ParameterLocation::Path),
        ];

        let classified = classify_parameters(&parameters);

        assert_eq!(names(classified.path()), vec!["id", "org"]);
        assert_eq!(names(classified.query()), vec!["size", "page"]);
        assert_eq!(
            names(classified.get(&ParameterLocation::Header)),
            vec!["x-trace"]
        );
        insta::assert_debug_snapshot!(classified.locations().collect::<Vec<_>>(), @r"
        [
            Query,
            Path,
            Header,
        ]
        ");
    }

    #[test]
    fn should_group_unknown_locations_apart() {
        let matrix = ParameterLocation::Other("matrix".to_string());
        let parameters = vec![param("odd", matrix.clone())];

        let classified = classify_parameters(&parameters);

        assert!(classified.path().is_empty());
        assert!(classified.query().is_empty());
        assert_eq!(names(classified.get(&matrix)), vec!["odd"]);
    }

    #[test]
    fn should_accept_no_parameters() {
        let classified = classify_parameters(&[]);

        assert_eq!(classified.locations().count(), 0);
        assert!(classified.path().is_empty());
    }
}
