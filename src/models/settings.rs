//! Database tunable parameters.
//!
//! The values are opaque strings passed through to the service unchanged.
//! Field names map to the upper-case wire names, e.g. `act_sortmem_limit`
//! is sent as `ACT_SORTMEM_LIMIT`.

use serde::{Deserialize, Serialize};

macro_rules! tunable_parameters {
    ($(#[$meta:meta])* $name:ident { $($field:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub struct $name {
            $(
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<String>,
            )+
        }

        impl $name {
            /// Field names of every parameter, in declaration order.
            pub const PARAMETERS: &'static [&'static str] = &[$(stringify!($field)),+];

            /// The parameters that are set, as `(field name, value)` pairs.
            pub fn set_parameters(&self) -> Vec<(&'static str, &str)> {
                let mut set = Vec::new();
                $(
                    if let Some(value) = self.$field.as_deref() {
                        set.push((stringify!($field), value));
                    }
                )+
                set
            }
        }
    };
}

tunable_parameters! {
    /// Db2 registry variables.
    CreateCustomSettingsRegistry {
        db2bidi,
        db2compopt,
        db2lock_to_rb,
        db2stmm,
        db2_alternate_authz_behaviour,
        db2_antijoin,
        db2_ats_enable,
        db2_deferred_prepare_semantics,
        db2_evaluncommitted,
        db2_extended_optimization,
        db2_index_pctfree_default,
        db2_inlist_to_nljn,
        db2_minimize_listprefetch,
        db2_object_table_entries,
        db2_optprofile,
        db2_optstats_log,
        db2_opt_max_temp_size,
        db2_parallel_io,
        db2_reduced_optimization,
        db2_selectivity,
        db2_skipdeleted,
        db2_skipinserted,
        db2_sync_release_lock_attributes,
        db2_truncate_reusestorage,
        db2_use_alternate_page_cleaning,
        db2_view_reopt_values,
        db2_wlm_settings,
        db2_workload,
    }
}

tunable_parameters! {
    /// Database configuration parameters.
    CreateCustomSettingsDb {
        act_sortmem_limit,
        alt_collate,
        appgroup_mem_sz,
        applheapsz,
        appl_memory,
        app_ctl_heap_sz,
        archretrydelay,
        authn_cache_duration,
        autorestart,
        auto_cg_stats,
        auto_maint,
        auto_reorg,
        auto_reval,
        auto_runstats,
        auto_sampling,
        auto_stats_views,
        auto_stmt_stats,
        auto_tbl_maint,
        avg_appls,
        catalogcache_sz,
        chngpgs_thresh,
        cur_commit,
        database_memory,
        dbheap,
        db_collname,
        db_mem_thresh,
        ddl_compression_def,
        ddl_constraint_def,
        decflt_rounding,
        dec_arithmetic,
        dec_to_char_fmt,
        dft_degree,
        dft_extent_sz,
        dft_loadrec_ses,
        dft_mttb_types,
        dft_prefetch_sz,
        dft_queryopt,
        dft_refresh_age,
        dft_schemas_dcc,
        dft_sqlmathwarn,
        dft_table_org,
        dlchktime,
        enable_xmlchar,
        extended_row_sz,
        groupheap_ratio,
        indexrec,
        large_aggregation,
        locklist,
        locktimeout,
        logindexbuild,
        log_appl_info,
        log_ddl_stmts,
        log_disk_cap,
        maxappls,
        maxfilop,
        maxlocks,
        min_dec_div_3,
        mon_act_metrics,
        mon_deadlock,
        mon_lck_msg_lvl,
        mon_locktimeout,
        mon_lockwait,
        mon_lw_thresh,
        mon_obj_metrics,
        mon_pkglist_sz,
        mon_req_metrics,
        mon_rtn_data,
        mon_rtn_execlist,
        mon_uow_data,
        mon_uow_execlist,
        mon_uow_pkglist,
        nchar_mapping,
        num_freqvalues,
        num_iocleaners,
        num_ioservers,
        num_log_span,
        num_quantiles,
        opt_buffpage,
        opt_direct_wrkld,
        opt_locklist,
        opt_maxlocks,
        opt_sortheap,
        page_age_trgt_gcr,
        page_age_trgt_mcr,
        pckcachesz,
        pl_stack_trace,
        self_tuning_mem,
        seqdetect,
        sheapthres_shr,
        softmax,
        sortheap,
        sql_ccflags,
        stat_heap_sz,
        stmtheap,
        stmt_conc,
        string_units,
        systime_period_adj,
        trackmod,
        util_heap_sz,
        wlm_admission_ctrl,
        wlm_agent_load_trgt,
        wlm_cpu_limit,
        wlm_cpu_shares,
        wlm_cpu_share_mode,
    }
}

tunable_parameters! {
    /// Database manager configuration parameters.
    CreateCustomSettingsDbm {
        comm_bandwidth,
        cpuspeed,
        dft_mon_bufpool,
        dft_mon_lock,
        dft_mon_sort,
        dft_mon_stmt,
        dft_mon_table,
        dft_mon_timestamp,
        dft_mon_uow,
        diaglevel,
        federated_async,
        indexrec,
        intra_parallel,
        keepfenced,
        max_connretries,
        max_querydegree,
        mon_heap_sz,
        multipartsizemb,
        notifylevel,
        num_initagents,
        num_initfenced,
        num_poolagents,
        resync_interval,
        rqrioblk,
        start_stop_time,
        util_impact_lim,
        wlm_dispatcher,
        wlm_disp_concur,
        wlm_disp_cpu_shares,
        wlm_disp_min_util,
    }
}

/// Result of applying custom settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessPostCustomSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// The tunable parameters and their descriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessTuneableParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuneable_param: Option<SuccessTuneableParamsTuneableParam>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessTuneableParamsTuneableParam {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db: Option<CreateCustomSettingsDb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dbm: Option<CreateCustomSettingsDbm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<CreateCustomSettingsRegistry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_are_upper_case() {
        let db = CreateCustomSettingsDb {
            act_sortmem_limit: Some("NONE".to_string()),
            min_dec_div_3: Some("NO".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&db).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "ACT_SORTMEM_LIMIT": "NONE", "MIN_DEC_DIV_3": "NO" })
        );

        let registry = CreateCustomSettingsRegistry {
            db2bidi: Some("YES".to_string()),
            db2lock_to_rb: Some("STATEMENT".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "DB2BIDI": "YES", "DB2LOCK_TO_RB": "STATEMENT" })
        );
    }

    #[test]
    fn test_set_parameters_lists_only_set_fields() {
        let dbm = CreateCustomSettingsDbm {
            diaglevel: Some("3".to_string()),
            ..Default::default()
        };
        assert_eq!(dbm.set_parameters(), vec![("diaglevel", "3")]);
        assert!(CreateCustomSettingsDbm::default().set_parameters().is_empty());
    }

    #[test]
    fn test_parameter_counts() {
        assert_eq!(CreateCustomSettingsRegistry::PARAMETERS.len(), 28);
        assert_eq!(CreateCustomSettingsDb::PARAMETERS.len(), 104);
        assert_eq!(CreateCustomSettingsDbm::PARAMETERS.len(), 30);
    }
}
