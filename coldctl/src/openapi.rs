//! OpenAPI documentation for the customer API.
//!
//! Paths are declared relative to `/api`, where [`crate::api::routes`] mounts
//! them. The rendered reference is served at `/docs`.

use utoipa::OpenApi;

use crate::api::handlers;
use crate::api::models::{
    CustomerCreate, CustomerDetailResponse, CustomerResponse, CustomerUpdate, EmployeeCreate, EmployeeResponse,
    EmployeeUpdate, FilePayload, FilesCreate, LogoPayload, LogoSaved,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "coldctl API",
        description = "Customer directory for a refrigeration service business: \
                       customer cards with logos, attached file records and contact employees."
    ),
    paths(
        handlers::customers::list_customers,
        handlers::customers::get_customer,
        handlers::customers::create_customer,
        handlers::customers::update_customer,
        handlers::customers::delete_customer,
        handlers::customers::set_logo,
        handlers::files::add_files,
        handlers::files::delete_file,
        handlers::employees::add_employee,
        handlers::employees::update_employee,
        handlers::employees::delete_employee,
    ),
    components(schemas(
        CustomerCreate,
        CustomerUpdate,
        CustomerResponse,
        CustomerDetailResponse,
        LogoPayload,
        LogoSaved,
        FilePayload,
        FilesCreate,
        EmployeeCreate,
        EmployeeUpdate,
        EmployeeResponse,
    )),
    tags(
        (name = "customers", description = "Customer cards"),
        (name = "files", description = "File records attached to customers"),
        (name = "employees", description = "Customer contact employees"),
    )
)]
pub struct ApiDoc;
