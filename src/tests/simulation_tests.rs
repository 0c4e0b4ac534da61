use std::collections::HashSet;

use crate::service::NewProduct;
use crate::tests::create_test_service;

#[tokio::test]
async fn feature_importance_table_is_fixed() {
    let (service, _uploads) = create_test_service();
    let table = service.feature_importance();
    assert_eq!(table.len(), 5);
    assert_eq!(table[0].feature, "Purchase History");
    assert_eq!(table.iter().map(|row| row.importance).sum::<u32>(), 100);
}

#[tokio::test]
async fn cluster_assignment_uses_known_labels() {
    let (service, _uploads) = create_test_service();
    let labels: HashSet<&str> = [
        "Tech Enthusiast",
        "Fashion Lover",
        "Budget Shopper",
        "Lifestyle Shopper",
    ]
    .into_iter()
    .collect();

    for _ in 0..32 {
        let assigned = service.assign_cluster(Some("ana".to_string()));
        assert_eq!(assigned.user, "ana");
        assert!(labels.contains(assigned.cluster.as_str()));
    }

    assert_eq!(service.assign_cluster(None).user, "Unknown");
}

#[tokio::test]
async fn recommendations_stay_within_catalog_and_cap() {
    let (service, _uploads) = create_test_service();
    assert!(service.recommendations().await.unwrap().is_empty());

    for i in 0..7 {
        service
            .create_product(
                NewProduct {
                    name: format!("Item {i}"),
                    price: f64::from(i),
                    description: None,
                    category: None,
                },
                None,
            )
            .await
            .unwrap();
    }
    let catalog: HashSet<_> = service
        .list_products()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();

    let picks = service.recommendations().await.unwrap();
    assert_eq!(picks.len(), 5);
    for pair in picks.windows(2) {
        assert!(pair[0].ai_score >= pair[1].ai_score);
    }
    for pick in &picks {
        assert!(catalog.contains(&pick.product.id));
        assert!((60..=100).contains(&pick.ai_score));
    }
}

#[tokio::test]
async fn model_evaluation_is_fixed() {
    let (service, _uploads) = create_test_service();
    let eval = service.model_evaluation();
    assert_eq!(eval.rmse, 0.83);
    assert_eq!(eval.mae, 0.57);
    assert_eq!(eval.precision_at_k, 0.89);
}
