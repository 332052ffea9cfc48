use url::Url;

use super::{
    common::{FilterOperator, QueryCommon},
    Query,
};

/// Field holding a node's FRBR URI.
const FRBR_URI_FIELD: &str = "field_frbr_uri";

/// Query against the `node--legislation` collection.
#[derive(Default, Debug, Clone)]
pub struct LegislationQuery {
    pub common: QueryCommon,
    pub frbr_uri: Option<(String, FilterOperator)>,
    /// Sparse fieldset. Empty means every field is returned.
    pub fields: Vec<String>,
}

impl Query for LegislationQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some((value, operator)) = &self.frbr_uri {
            url.query_pairs_mut()
                .append_pair(&format!("filter[{}][value]", FRBR_URI_FIELD), value)
                .append_pair(
                    &format!("filter[{}][operator]", FRBR_URI_FIELD),
                    &operator.to_string(),
                );
        }
        if !self.fields.is_empty() {
            url.query_pairs_mut()
                .append_pair("fields[node--legislation]", &self.fields.join(","));
        }
        self.common.add_to_url(&url)
    }
}

impl LegislationQuery {
    /// Every expression in a place, e.g. `za` or `za-cpt`.
    pub fn for_place(place_code: &str) -> Self {
        Self::default().with_frbr_uri_prefix(&format!("/akn/{}/", place_code))
    }

    /// Matches nodes whose FRBR URI starts with `prefix`.
    pub fn with_frbr_uri_prefix(mut self, prefix: &str) -> Self {
        self.frbr_uri = Some((prefix.to_string(), FilterOperator::StartsWith));
        self
    }

    /// Matches the node with exactly this FRBR URI.
    pub fn with_frbr_uri(mut self, frbr_uri: &str) -> Self {
        self.frbr_uri = Some((frbr_uri.to_string(), FilterOperator::Equals));
        self
    }

    pub fn with_frbr_uri_filter(mut self, value: &str, operator: FilterOperator) -> Self {
        self.frbr_uri = Some((value.to_string(), operator));
        self
    }

    pub fn with_field(mut self, field: &str) -> Self {
        self.fields.push(field.to_string());
        self
    }

    pub fn with_fields<S: AsRef<str>>(mut self, fields: &[S]) -> Self {
        self.fields
            .extend(fields.iter().map(|f| f.as_ref().to_string()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/jsonapi/node/legislation").unwrap()
    }

    #[test]
    fn place_query_url() {
        let url = LegislationQuery::for_place("za")
            .with_field("field_frbr_uri")
            .add_to_url(&base());
        insta::assert_snapshot!(url.as_str(), @"https://example.com/jsonapi/node/legislation?filter%5Bfield_frbr_uri%5D%5Bvalue%5D=%2Fakn%2Fza%2F&filter%5Bfield_frbr_uri%5D%5Boperator%5D=STARTS_WITH&fields%5Bnode--legislation%5D=field_frbr_uri");
    }

    #[test]
    fn paged_exact_query_url() {
        let url = LegislationQuery::default()
            .with_frbr_uri("/akn/za/act/2009/1")
            .with_fields(&["field_frbr_uri", "title"])
            .with_page_offset(50)
            .with_page_limit(25)
            .add_to_url(&base());
        insta::assert_snapshot!(url.as_str(), @"https://example.com/jsonapi/node/legislation?filter%5Bfield_frbr_uri%5D%5Bvalue%5D=%2Fakn%2Fza%2Fact%2F2009%2F1&filter%5Bfield_frbr_uri%5D%5Boperator%5D=%3D&fields%5Bnode--legislation%5D=field_frbr_uri%2Ctitle&page%5Boffset%5D=50&page%5Blimit%5D=25");
    }

    #[test]
    fn empty_query_adds_nothing() {
        let url = LegislationQuery::default().add_to_url(&base());
        assert_eq!(url.query(), None);
    }
}
