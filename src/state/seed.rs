/// The canonical seed dataset.
///
/// These four pieces are inserted the first time the catalog is observed
/// empty, with fixed ids, ranks 1-4, and fixed timestamps so that seeding
/// is reproducible (a bulk reset restores exactly this set).

use super::data::{Artwork, Category};

/// Build the four canonical seed records
pub fn seed_artworks() -> Vec<Artwork> {
    vec![
        Artwork {
            id: "real_asset_tiger".to_string(),
            title: "下山虎".to_string(),
            image_url: "https://images.unsplash.com/photo-1561731216-c3a4d99437d5?q=80&w=1000"
                .to_string(),
            category: Category::Animals,
            description: "这幅湘绣作品生动描绘了一只威武猛虎下山的姿态。画面中老虎神态威严，\
                双目炯炯有神，虎皮斑纹自然流畅，毛发质感细腻且富有立体感。背景衬以挺拔的翠竹\
                与坚硬的山石，通过精妙的色彩衔接与构图，完美展现了猛虎的雄姿与力量感，是典型\
                的湘绣写实风格作品。"
                .to_string(),
            needlework: "鬅毛针、掺针、齐针、混针".to_string(),
            display_order: 1,
            created_at: 1_700_000_000_000,
        },
        Artwork {
            id: "real_asset_phoenix".to_string(),
            title: "金凤展翅".to_string(),
            image_url: "https://images.unsplash.com/photo-1635322966219-b75ed372eb01?q=80&w=1000"
                .to_string(),
            category: Category::Others,
            description: "采用高纯度金线绣制，展现了湘绣中极其罕见的盘金绣技法。凤凰羽翼层层\
                叠叠，在光线下流光溢彩，寓意吉祥富贵，工艺难度极高。"
                .to_string(),
            needlework: "盘金绣、旋针、乱针".to_string(),
            display_order: 2,
            created_at: 1_700_000_000_001,
        },
        Artwork {
            id: "real_asset_holy_land".to_string(),
            title: "圣地".to_string(),
            image_url: "https://images.unsplash.com/photo-1599578705716-8d3b94874409?q=80&w=1000"
                .to_string(),
            category: Category::Landscapes,
            description: "以延安宝塔山为背景，构图简洁雅致。红叶满山，塔影婆娑，展现了革命圣\
                地的庄严与静谧，是红色主题湘绣的精品之作。"
                .to_string(),
            needlework: "平针、铺针、切针".to_string(),
            display_order: 3,
            created_at: 1_700_000_000_002,
        },
        Artwork {
            id: "real_asset_cat".to_string(),
            title: "湘绣：猫".to_string(),
            image_url: "https://images.unsplash.com/photo-1514888286974-6c03e2ca1dba?q=80&w=1000"
                .to_string(),
            category: Category::Animals,
            description: "湘绣最为闻名的“猫”系列，精髓在于眼神。采用细若游丝的真丝线分层绣制，\
                瞳孔深邃，毛发根根分明，生动还原了灵猫的机敏与柔美。"
                .to_string(),
            needlework: "掺针、游针、毛针".to_string(),
            display_order: 4,
            created_at: 1_700_000_000_003,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ranks_are_one_through_four() {
        let seeds = seed_artworks();
        let ranks: Vec<i64> = seeds.iter().map(|a| a.display_order).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let seeds = seed_artworks();
        for (i, a) in seeds.iter().enumerate() {
            for b in &seeds[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
