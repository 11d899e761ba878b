pub mod accounts;
pub mod admin;
pub mod cart;
pub mod orders;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/accounts")
            .route("", web::post().to(accounts::register))
            .route("/federated", web::post().to(accounts::register_federated))
            .route("/otp", web::post().to(accounts::issue_otp))
            .route("/otp/verify", web::post().to(accounts::verify_otp))
            .route("/{identifier}", web::get().to(accounts::lookup))
            .route("/{account_id}/password", web::put().to(accounts::change_password))
            .route("/{account_id}/cart", web::post().to(cart::add_to_cart))
            .route("/{account_id}/cart", web::delete().to(cart::clear_cart))
            .route(
                "/{account_id}/cart/{product_id}",
                web::delete().to(cart::remove_from_cart),
            )
            .route("/{account_id}/wishlist", web::post().to(cart::add_to_wishlist))
            .route(
                "/{account_id}/wishlist/{product_id}",
                web::delete().to(cart::remove_from_wishlist),
            )
            .route("/{account_id}/addresses", web::post().to(orders::add_address))
            .route("/{account_id}/orders", web::post().to(orders::place_order))
            .route(
                "/{account_id}/orders/{order_id}",
                web::delete().to(orders::cancel_order),
            ),
    )
    .service(web::scope("/orders").route("", web::get().to(orders::list_orders)))
    .service(
        web::scope("/admin")
            .route("/login", web::post().to(admin::login))
            .route("/verify/{token}", web::get().to(admin::verify_token)),
    );
}
