use minijinja::{Environment, Error, context};

use crate::view::DirectoryView;

const PAGE: &str = "index.html";

/// Page templates, `.html` names are auto-escaped.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, Error> {
        let mut env = Environment::new();
        env.add_template(PAGE, include_str!("../templates/index.html"))?;

        Ok(Self { env })
    }

    pub fn page(&self, view: &DirectoryView) -> Result<String, Error> {
        let filters = &view.filters;

        self.env.get_template(PAGE)?.render(context! {
            search => filters.search,
            selected => context! {
                district => filters.district.as_str(),
                kind => filters.kind.as_str(),
                ownership => filters.ownership.as_str(),
            },
            options => view.options(),
            cards => view.cards(),
        })
    }
}
