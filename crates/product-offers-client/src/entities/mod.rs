mod calendar;
mod form_state;
mod graphql;
mod notification;
mod offer;
mod product;
mod request_status;
mod view;

pub use calendar::{iso_date, parse_calendar_date, us_date};
pub use form_state::FormState;
pub use graphql::{GraphQLErrorBody, GraphQLRequest, GraphQLResponse};
pub use notification::{Notification, NotificationKind};
pub use offer::Offer;
pub use product::{NewProduct, Product, ProductType};
pub use request_status::RequestStatus;
pub use view::{Card, FormView, Section, SectionBody};
