mod api_ext;
mod builtin_user;
mod builtin_users_initializer;
mod database_ext;
mod user;
mod user_id;

pub use self::{
    builtin_user::BuiltinUser, builtin_users_initializer::builtin_users_initializer, user::User,
    user_id::UserId,
};
