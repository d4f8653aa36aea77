#[rocket::launch]
fn rocket() -> _ {
    dummy_api::rocket()
}
