use super::*;
use storefront_core::PaymentMethod;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["storefront"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn products_defaults_to_first_page_of_twelve() {
    let cli = Cli::try_parse_from(["storefront", "products"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Products {
            page: 1,
            limit: 12,
            category: None,
            query: None
        })
    ));
}

#[test]
fn products_with_filters() {
    let cli = Cli::try_parse_from([
        "storefront",
        "products",
        "--page",
        "3",
        "--category",
        "dung-cu-cam-tay",
        "--query",
        "kìm",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Products {
            page: 3,
            category: Some(ref c),
            query: Some(ref q),
            ..
        }) if c == "dung-cu-cam-tay" && q == "kìm"
    ));
}

#[test]
fn cart_add_defaults_to_one() {
    let cli = Cli::try_parse_from(["storefront", "cart", "add", "may-khoan"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Cart {
            command: CartCommands::Add { ref slug, quantity: 1 }
        }) if slug == "may-khoan"
    ));
}

#[test]
fn cart_set_accepts_non_positive_quantity() {
    let cli = Cli::try_parse_from(["storefront", "cart", "set", "31", "-1"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Cart {
            command: CartCommands::Set {
                variant_id: 31,
                quantity: -1
            }
        })
    ));
}

#[test]
fn address_districts_takes_province_id() {
    let cli = Cli::try_parse_from(["storefront", "address", "districts", "79"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Address {
            command: AddressCommands::Districts { ref province_id }
        }) if province_id == "79"
    ));
}

#[test]
fn checkout_parses_payment_method_case_insensitively() {
    let cli = Cli::try_parse_from([
        "storefront",
        "checkout",
        "--name",
        "Nguyễn Văn An",
        "--phone",
        "0912345678",
        "--province",
        "79",
        "--district",
        "760",
        "--detail",
        "12 Lê Lợi",
        "--payment",
        "PayOS",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::Checkout(args)) => {
            assert_eq!(args.payment, PaymentMethod::PayOs);
            assert_eq!(args.ward, None);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn checkout_defaults_to_cash_on_delivery() {
    let cli = Cli::try_parse_from([
        "storefront", "checkout", "--name", "An", "--phone", "0912345678", "--province", "79",
        "--district", "760", "--ward", "26734", "--detail", "12 Lê Lợi",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::Checkout(args)) => {
            assert_eq!(args.payment, PaymentMethod::CashOnDelivery);
            assert_eq!(args.ward.as_deref(), Some("26734"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn checkout_rejects_unknown_payment_method() {
    let result = Cli::try_parse_from([
        "storefront", "checkout", "--name", "An", "--phone", "0912345678", "--province", "79",
        "--district", "760", "--detail", "x", "--payment", "visa",
    ]);
    assert!(result.is_err());
}

#[test]
fn checkout_requires_district() {
    let result = Cli::try_parse_from([
        "storefront", "checkout", "--name", "An", "--phone", "0912345678", "--province", "79",
        "--detail", "x",
    ]);
    assert!(result.is_err());
}

#[test]
fn track_takes_code_and_phone() {
    let cli = Cli::try_parse_from(["storefront", "track", "DH0001", "0901234567"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Track { ref order_code, ref phone })
            if order_code == "DH0001" && phone == "0901234567"
    ));
}

#[test]
fn gateway_return_code_is_optional() {
    let cli = Cli::try_parse_from(["storefront", "gateway-return"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::GatewayReturn { order_code: None })
    ));
    let cli = Cli::try_parse_from(["storefront", "gateway-cancel"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::GatewayCancel)));
}

#[test]
fn reviews_add_parses_rating_and_comment() {
    let cli = Cli::try_parse_from([
        "storefront",
        "reviews",
        "add",
        "may-khoan",
        "--rating",
        "4",
        "--comment",
        "Dùng tốt",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Reviews {
            command: ReviewCommands::Add { ref slug, rating: 4, ref comment }
        }) if slug == "may-khoan" && comment == "Dùng tốt"
    ));
}

#[test]
fn reviews_add_requires_rating() {
    assert!(Cli::try_parse_from(["storefront", "reviews", "add", "may-khoan"]).is_err());
}

#[test]
fn reviews_list_takes_slug() {
    let cli = Cli::try_parse_from(["storefront", "reviews", "list", "kim-cat"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Reviews {
            command: ReviewCommands::List { ref slug }
        }) if slug == "kim-cat"
    ));
}
