
mod avatar_test;
mod otp_test;
mod register_test;
mod session_test;
mod token_test;
