/// Placeholder substituted with the target city in query templates.
pub const CITY_PLACEHOLDER: &str = "{city}";

/// Template used for caller-supplied business types.
pub const CUSTOM_TEMPLATE: &str = "best {label} in {city}";

/// Built-in professional-service categories searched when the caller names none.
const PROFESSIONAL_SERVICES: [(&str, &str); 12] = [
    ("lawyer", "best lawyer in {city}"),
    ("surgeon", "top surgeon in {city}"),
    ("dentist", "best dentist near {city}"),
    ("financial_advisor", "financial advisor in {city}"),
    ("custom_home_builder", "custom home builder in {city}"),
    ("roofing_company", "roofing company in {city}"),
    ("solar_installer", "solar panel installer in {city}"),
    ("hvac_company", "hvac repair company in {city}"),
    ("kitchen_remodeler", "kitchen remodeling contractor in {city}"),
    ("pool_builder", "pool builder in {city}"),
    ("foundation_repair", "foundation repair company in {city}"),
    ("electrician", "best electrician in {city}"),
];

/// A search category: the industry label stamped on records and the query
/// template sent to the search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub label: String,
    pub template: String,
}

impl Category {
    pub fn new(label: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            template: template.into(),
        }
    }

    pub fn query_for(&self, city: &str) -> String {
        self.template.replace(CITY_PLACEHOLDER, city)
    }
}

/// Ordered, immutable set of categories handed to the Collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    categories: Vec<Category>,
}

impl CategoryTable {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn professional_services() -> Self {
        Self::new(
            PROFESSIONAL_SERVICES
                .iter()
                .map(|(label, template)| Category::new(*label, *template))
                .collect(),
        )
    }

    /// One category per label, each searched as `best <label> in <city>`.
    /// Labels are trimmed; blank labels are dropped.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            labels
                .into_iter()
                .map(|l| l.as_ref().trim().to_string())
                .filter(|l| !l.is_empty())
                .map(|label| {
                    let template = CUSTOM_TEMPLATE.replace("{label}", &label);
                    Category::new(label, template)
                })
                .collect(),
        )
    }

    /// Caller labels when any are given, the built-in set otherwise.
    pub fn from_labels_or_default(labels: Option<&[String]>) -> Self {
        match labels {
            Some(labels) => {
                let table = Self::from_labels(labels);
                if table.is_empty() {
                    Self::professional_services()
                } else {
                    table
                }
            }
            None => Self::professional_services(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
