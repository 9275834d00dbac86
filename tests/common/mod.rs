pub mod wiremock_helpers;
